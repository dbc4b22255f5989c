use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Closed set of asset categories a scan can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryCode {
    TokenWheel,
    FadedWheel,
    StepUp,
    Other,
}

impl CategoryCode {
    pub fn code(self) -> &'static str {
        match self {
            CategoryCode::TokenWheel => "TW",
            CategoryCode::FadedWheel => "FW",
            CategoryCode::StepUp => "DW",
            CategoryCode::Other => "O",
        }
    }

    pub fn spec(self) -> &'static CategorySpec {
        lookup(self)
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category code `{0}` (expected one of TW, FW, DW, O)")]
pub struct ParseCategoryError(pub String);

impl FromStr for CategoryCode {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CATEGORIES
            .iter()
            .find(|spec| spec.code.code().eq_ignore_ascii_case(wanted))
            .map(|spec| spec.code)
            .ok_or_else(|| ParseCategoryError(wanted.to_string()))
    }
}

/// One image emitted per (region, index) pair of a wheel category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubAsset {
    pub label: &'static str,
    pub extension: &'static str,
}

const fn sub(label: &'static str, extension: &'static str) -> SubAsset {
    SubAsset { label, extension }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPlan {
    /// Only the store candidates; no splash and no regional cross-product.
    StoreOnly,
    /// Priority set followed by regions × indices × sub-assets.
    Wheel {
        prefix: &'static str,
        sub_assets: &'static [SubAsset],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySpec {
    pub code: CategoryCode,
    pub label: &'static str,
    pub plan: GenerationPlan,
}

/// Category code → generation plan. Adding a category means adding a row here.
pub const CATEGORIES: &[CategorySpec] = &[
    CategorySpec {
        code: CategoryCode::TokenWheel,
        label: "Token Wheel (TW)",
        plan: GenerationPlan::Wheel {
            prefix: "TW",
            sub_assets: &[
                sub("Tab", "jpg"),
                sub("Title", "png"),
                sub("LobbyBG", "jpg"),
                sub("BG", "png"),
            ],
        },
    },
    CategorySpec {
        code: CategoryCode::FadedWheel,
        label: "Faded Wheel (FW)",
        plan: GenerationPlan::Wheel {
            prefix: "FW",
            sub_assets: &[sub("Tab", "jpg"), sub("BG", "jpg"), sub("Title", "png")],
        },
    },
    CategorySpec {
        code: CategoryCode::StepUp,
        label: "Step Up (DW)",
        plan: GenerationPlan::Wheel {
            prefix: "DW",
            sub_assets: &[sub("Tab", "jpg"), sub("Title", "png"), sub("BG", "jpg")],
        },
    },
    CategorySpec {
        code: CategoryCode::Other,
        label: "Other Royale (O)",
        plan: GenerationPlan::StoreOnly,
    },
];

pub fn lookup(code: CategoryCode) -> &'static CategorySpec {
    // Row order of `CATEGORIES` must follow the enum order.
    let row = match code {
        CategoryCode::TokenWheel => 0,
        CategoryCode::FadedWheel => 1,
        CategoryCode::StepUp => 2,
        CategoryCode::Other => 3,
    };
    &CATEGORIES[row]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_has_a_row() {
        for code in [
            CategoryCode::TokenWheel,
            CategoryCode::FadedWheel,
            CategoryCode::StepUp,
            CategoryCode::Other,
        ] {
            assert_eq!(lookup(code).code, code);
        }
    }

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("tw".parse(), Ok(CategoryCode::TokenWheel));
        assert_eq!(" DW ".parse(), Ok(CategoryCode::StepUp));
        assert_eq!("o".parse(), Ok(CategoryCode::Other));
        assert_eq!(
            "XX".parse::<CategoryCode>(),
            Err(ParseCategoryError("XX".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for spec in CATEGORIES {
            assert_eq!(spec.code.to_string().parse(), Ok(spec.code));
        }
    }
}
