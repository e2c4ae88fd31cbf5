use serde::{Deserialize, Serialize};

pub type CategoryId = i64;

// ============================================================================
// Category codes
// ============================================================================

/// Fixed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryCode {
    Analgesicos,
    Antibioticos,
    Antigripales,
    Vitaminas,
    Antiinflamatorios,
    Antialergicos,
}

impl CategoryCode {
    pub const ALL: [CategoryCode; 6] = [
        CategoryCode::Analgesicos,
        CategoryCode::Antibioticos,
        CategoryCode::Antigripales,
        CategoryCode::Vitaminas,
        CategoryCode::Antiinflamatorios,
        CategoryCode::Antialergicos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryCode::Analgesicos => "ANALGESICOS",
            CategoryCode::Antibioticos => "ANTIBIOTICOS",
            CategoryCode::Antigripales => "ANTIGRIPALES",
            CategoryCode::Vitaminas => "VITAMINAS",
            CategoryCode::Antiinflamatorios => "ANTIINFLAMATORIOS",
            CategoryCode::Antialergicos => "ANTIALERGICOS",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryCode::Analgesicos => "Analgésicos",
            CategoryCode::Antibioticos => "Antibióticos",
            CategoryCode::Antigripales => "Antigripales",
            CategoryCode::Vitaminas => "Vitaminas",
            CategoryCode::Antiinflamatorios => "Antiinflamatorios",
            CategoryCode::Antialergicos => "Antialérgicos",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Product category. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    #[serde(rename = "nombre")]
    pub code: String,

    #[serde(rename = "nombre_display", default)]
    pub display_name: String,
}

impl Category {
    pub fn new(id: CategoryId, code: CategoryCode) -> Self {
        Self {
            id,
            code: code.as_str().to_string(),
            display_name: code.display_name().to_string(),
        }
    }

    /// Display name, or the raw code when the server sent none.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.code
        } else {
            &self.display_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_codes_round_trip() {
        for code in CategoryCode::ALL {
            assert_eq!(CategoryCode::from_code(code.as_str()), Some(code));
            assert_eq!(
                serde_json::to_value(code).unwrap(),
                json!(code.as_str())
            );
        }
        assert_eq!(CategoryCode::from_code("OTROS"), None);
    }

    #[test]
    fn test_label_falls_back_to_code() {
        let c: Category = serde_json::from_value(json!({"id": 1, "nombre": "VITAMINAS"})).unwrap();
        assert_eq!(c.label(), "VITAMINAS");
        assert_eq!(Category::new(2, CategoryCode::Antialergicos).label(), "Antialérgicos");
    }
}
