//! Cost estimation
//!
//! Pure function from (rate table, print settings, page count) to a cost.
//! Uses rust_decimal internally, stores as f64 rounded to 2 decimal places.
//!
//! Pricing structure:
//! - the cover page adds a flat charge on top, once regardless of copies
//! - every page of the merged document (cover included) is rated by
//!   (paper type, page size, color mode); photo paper ignores color
//! - double-sided jobs round the page count up to an even number, since a
//!   leftover single page still consumes a full sheet
//! - copies beyond the first are xerox copies at a flat per-page rate
//!   tiered by color; the flat cover charge is never multiplied
//! - binding adds a flat surcharge

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::{Binding, ColorMode, PageSize, PaperType, PrintSettings, PrintSides};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert Decimal to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Configured per-page rates and surcharges (INR)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceTable {
    /// Flat charge for the generated cover page (never multiplied by copies)
    pub front_page: Decimal,

    // Normal paper, by (page size, color)
    pub normal_a4_bw: Decimal,
    pub normal_a4_color: Decimal,
    pub normal_a3_bw: Decimal,
    pub normal_a3_color: Decimal,

    // Photo paper, by page size only (color makes no difference)
    pub photo_a4: Decimal,
    pub photo_a3: Decimal,

    // Xerox rate for copies beyond the first, by color only
    pub xerox_bw: Decimal,
    pub xerox_color: Decimal,

    // Flat binding surcharges
    pub binding_spiral: Decimal,
    pub binding_soft: Decimal,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            front_page: Decimal::new(2, 0),
            normal_a4_bw: Decimal::new(2, 0),
            normal_a4_color: Decimal::new(5, 0),
            normal_a3_bw: Decimal::new(4, 0),
            normal_a3_color: Decimal::new(20, 0),
            photo_a4: Decimal::new(20, 0),
            photo_a3: Decimal::new(40, 0),
            xerox_bw: Decimal::new(15, 1),
            xerox_color: Decimal::new(5, 0),
            binding_spiral: Decimal::new(25, 0),
            binding_soft: Decimal::new(100, 0),
        }
    }
}

impl PriceTable {
    /// Per-page rate for the first printed copy
    fn page_rate(&self, settings: &PrintSettings) -> Decimal {
        match (settings.paper_type, settings.page_size, settings.color_mode) {
            (PaperType::Photopaper, PageSize::A4, _) => self.photo_a4,
            (PaperType::Photopaper, PageSize::A3, _) => self.photo_a3,
            (PaperType::Normal, PageSize::A4, ColorMode::Bw) => self.normal_a4_bw,
            (PaperType::Normal, PageSize::A4, ColorMode::Color) => self.normal_a4_color,
            (PaperType::Normal, PageSize::A3, ColorMode::Bw) => self.normal_a3_bw,
            (PaperType::Normal, PageSize::A3, ColorMode::Color) => self.normal_a3_color,
        }
    }

    /// Per-page rate for xerox copies (copies beyond the first)
    fn xerox_rate(&self, settings: &PrintSettings) -> Decimal {
        match settings.color_mode {
            ColorMode::Bw => self.xerox_bw,
            ColorMode::Color => self.xerox_color,
        }
    }

    /// Flat surcharge for the selected binding
    fn binding_surcharge(&self, settings: &PrintSettings) -> Decimal {
        match settings.binding {
            Binding::None => Decimal::ZERO,
            Binding::Spiral => self.binding_spiral,
            Binding::Soft => self.binding_soft,
        }
    }
}

/// Estimate the cost of a print job. Pure and deterministic.
///
/// `total_pages` is the merged document's full page count, cover included;
/// every page is rated, and the cover's flat charge comes on top of that.
pub fn estimate_cost(table: &PriceTable, settings: &PrintSettings, total_pages: u32) -> Decimal {
    // Double-sided: a trailing odd page still occupies a full sheet,
    // so round the rated page count up to the nearest even number.
    let rated_pages = if settings.print_sides == PrintSides::Double {
        total_pages.div_ceil(2) * 2
    } else {
        total_pages
    };
    let pages = Decimal::from(rated_pages);

    let mut estimate = table.front_page + pages * table.page_rate(settings);

    // Copies beyond the first are xeroxed from the printed original.
    // The flat cover charge is only ever paid once.
    if settings.copies > 1 {
        let extra_copies = Decimal::from(settings.copies - 1);
        estimate += pages * table.xerox_rate(settings) * extra_copies;
    }

    estimate + table.binding_surcharge(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> PrintSettings {
        PrintSettings::default()
    }

    #[test]
    fn test_base_estimate_bw_a4_single() {
        // cover(2) + 5 pages x 2.0 = 12.0
        let cost = estimate_cost(&PriceTable::default(), &settings(), 5);
        assert_eq!(to_f64(cost), 12.0);
    }

    #[test]
    fn test_determinism() {
        let table = PriceTable::default();
        let s = PrintSettings {
            color_mode: ColorMode::Color,
            page_size: PageSize::A3,
            copies: 3,
            binding: Binding::Spiral,
            ..settings()
        };
        assert_eq!(estimate_cost(&table, &s, 17), estimate_cost(&table, &s, 17));
    }

    #[test]
    fn test_double_sided_rounds_up_to_even() {
        let s = PrintSettings {
            print_sides: PrintSides::Double,
            ..settings()
        };
        // 5 pages duplexed price as 6: cover(2) + 6 x 2.0 = 14.0
        let cost = estimate_cost(&PriceTable::default(), &s, 5);
        assert_eq!(to_f64(cost), 14.0);

        // Even counts are unchanged: cover(2) + 6 x 2.0 = 14.0
        let cost_even = estimate_cost(&PriceTable::default(), &s, 6);
        assert_eq!(to_f64(cost_even), 14.0);
    }

    #[test]
    fn test_extra_copies_use_xerox_rate() {
        let s = PrintSettings {
            copies: 3,
            ..settings()
        };
        // cover(2) + 5 x 2.0 + 5 x 1.5 x 2 extra copies = 27.0
        let cost = estimate_cost(&PriceTable::default(), &s, 5);
        assert_eq!(to_f64(cost), 27.0);
    }

    #[test]
    fn test_color_copies_use_color_xerox_rate() {
        let s = PrintSettings {
            color_mode: ColorMode::Color,
            copies: 2,
            ..settings()
        };
        // cover(2) + 4 x 5.0 + 4 x 5.0 x 1 = 42.0
        let cost = estimate_cost(&PriceTable::default(), &s, 4);
        assert_eq!(to_f64(cost), 42.0);
    }

    #[test]
    fn test_photo_paper_ignores_color() {
        let bw = PrintSettings {
            paper_type: PaperType::Photopaper,
            ..settings()
        };
        let color = PrintSettings {
            color_mode: ColorMode::Color,
            ..bw
        };
        let table = PriceTable::default();
        assert_eq!(
            estimate_cost(&table, &bw, 3),
            estimate_cost(&table, &color, 3)
        );
        // cover(2) + 3 x 20.0 = 62.0
        assert_eq!(to_f64(estimate_cost(&table, &bw, 3)), 62.0);
    }

    #[test]
    fn test_a3_color_rate() {
        let s = PrintSettings {
            color_mode: ColorMode::Color,
            page_size: PageSize::A3,
            ..settings()
        };
        // cover(2) + 2 x 20.0 = 42.0
        assert_eq!(to_f64(estimate_cost(&PriceTable::default(), &s, 2)), 42.0);
    }

    #[test]
    fn test_binding_surcharges() {
        let table = PriceTable::default();
        let spiral = PrintSettings {
            binding: Binding::Spiral,
            ..settings()
        };
        let soft = PrintSettings {
            binding: Binding::Soft,
            ..settings()
        };
        // base 12.0 for 5 pages + surcharge
        assert_eq!(to_f64(estimate_cost(&table, &spiral, 5)), 37.0);
        assert_eq!(to_f64(estimate_cost(&table, &soft, 5)), 112.0);
    }

    #[test]
    fn test_xerox_rate_has_decimal_precision() {
        let s = PrintSettings {
            copies: 2,
            ..settings()
        };
        // cover(2) + 3 x 2.0 + 3 x 1.5 = 12.5
        assert_eq!(to_f64(estimate_cost(&PriceTable::default(), &s, 3)), 12.5);
    }
}
