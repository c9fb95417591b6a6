// ABOUTME: PDF export for diet plans
// ABOUTME: Renders base or weekly plan payloads into a downloadable A4 document

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Plan-to-PDF rendering.
//!
//! The export endpoint accepts the plan payload in the request body rather
//! than re-reading it from storage, so clients can export exactly what they
//! are displaying, edits included.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use serde::Deserialize;
use vitalpath_core::models::{DayPlan, PlannedMeal};

use crate::errors::{AppError, AppResult};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const TITLE_SIZE: f32 = 20.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 10.0;

/// Plan payload accepted by the export endpoint.
///
/// Either `meals` (base plan) or `weekly_plan` (seven-day plan) must be
/// non-empty; when both are present the weekly section is rendered after
/// the base section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanExportRequest {
    /// Document title; defaults to "Diet Plan"
    pub title: Option<String>,
    pub diet_type: Option<String>,
    pub target_calories: Option<f64>,
    #[serde(default)]
    pub meals: Vec<PlannedMeal>,
    #[serde(default, rename = "weeklyPlan")]
    pub weekly_plan: Vec<DayPlan>,
}

/// Render a plan payload into PDF bytes.
///
/// # Errors
///
/// Returns `AppError::InvalidInput` when the payload carries no meals at
/// all, and `AppError::InternalError` when the PDF backend fails.
pub fn render_plan_pdf(request: &PlanExportRequest) -> AppResult<Vec<u8>> {
    if request.meals.is_empty() && request.weekly_plan.is_empty() {
        return Err(AppError::invalid_input(
            "Export payload must contain meals or a weekly plan",
        ));
    }

    let title = request.title.as_deref().unwrap_or("Diet Plan");
    let mut writer = PdfWriter::new(title)?;

    writer.line(title, TITLE_SIZE, true);
    if let Some(diet_type) = request.diet_type.as_deref() {
        writer.line(&format!("Diet type: {diet_type}"), BODY_SIZE, false);
    }
    if let Some(target) = request.target_calories {
        writer.line(&format!("Target: {target:.0} kcal/day"), BODY_SIZE, false);
    }
    writer.gap(4.0);

    if !request.meals.is_empty() {
        writer.line("Daily Meals", HEADING_SIZE, true);
        for meal in &request.meals {
            write_meal(&mut writer, meal);
        }
    }

    for day in &request.weekly_plan {
        writer.gap(3.0);
        writer.line(&day.day, HEADING_SIZE, true);
        let slots = [
            ("Breakfast", day.meals.breakfast.as_ref()),
            ("Lunch", day.meals.lunch.as_ref()),
            ("Dinner", day.meals.dinner.as_ref()),
        ];
        for (label, meal) in slots {
            if let Some(meal) = meal {
                writer.line(&format!("{label}:"), BODY_SIZE, true);
                write_meal(&mut writer, meal);
            }
        }
    }

    writer.finish()
}

fn write_meal(writer: &mut PdfWriter, meal: &PlannedMeal) {
    writer.line(
        &format!("  {} ({:.0} kcal)", meal.name, meal.calories),
        BODY_SIZE,
        false,
    );
    let macros = format!(
        "    Protein {:.0} g, carbs {:.0} g, fat {:.0} g",
        meal.protein.unwrap_or(0.0),
        meal.carbs.unwrap_or(0.0),
        meal.fat.unwrap_or(0.0)
    );
    writer.line(&macros, BODY_SIZE, false);
    for food in &meal.foods {
        let text = match food.portion.as_deref() {
            Some(portion) => format!("    - {} ({portion})", food.name),
            None => format!("    - {}", food.name),
        };
        writer.line(&text, BODY_SIZE, false);
    }
}

/// Top-down text cursor over an A4 document, breaking pages as it fills
struct PdfWriter {
    document: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> AppResult<Self> {
        let (document, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = document
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::internal(format!("PDF generation failed: {e}")))?;
        let bold = document
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::internal(format!("PDF generation failed: {e}")))?;
        let layer = document.get_page(page).get_layer(layer);
        Ok(Self {
            document,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        let advance = size * 0.5;
        if self.y - advance < MARGIN_MM {
            let (page, layer) = self
                .document
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.document.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
        self.y -= advance;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn finish(self) -> AppResult<Vec<u8>> {
        self.document
            .save_to_bytes()
            .map_err(|e| AppError::internal(format!("PDF generation failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalpath_core::models::FoodPortion;

    fn sample_meal(name: &str) -> PlannedMeal {
        PlannedMeal {
            name: name.to_owned(),
            calories: 450.0,
            protein: Some(30.0),
            carbs: Some(40.0),
            fat: Some(15.0),
            foods: vec![FoodPortion {
                name: "Grilled Chicken".to_owned(),
                portion: Some("150g".to_owned()),
            }],
            image_url: None,
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let request = PlanExportRequest {
            title: Some("My Plan".to_owned()),
            diet_type: Some("balanced".to_owned()),
            target_calories: Some(2100.0),
            meals: vec![sample_meal("Breakfast Bowl"), sample_meal("Lunch Plate")],
            weekly_plan: Vec::new(),
        };

        let bytes = render_plan_pdf(&request).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_rejects_empty_payload() {
        let request = PlanExportRequest {
            title: None,
            diet_type: None,
            target_calories: None,
            meals: Vec::new(),
            weekly_plan: Vec::new(),
        };

        let err = render_plan_pdf(&request).unwrap_err();
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn test_render_handles_many_lines_with_page_breaks() {
        let meals: Vec<PlannedMeal> = (0..60).map(|i| sample_meal(&format!("Meal {i}"))).collect();
        let request = PlanExportRequest {
            title: None,
            diet_type: None,
            target_calories: None,
            meals,
            weekly_plan: Vec::new(),
        };

        let bytes = render_plan_pdf(&request).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
