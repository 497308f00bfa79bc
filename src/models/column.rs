//! Column model for the SDK

use serde::{Deserialize, Serialize};

/// A column's participation in an index constraint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRole {
    #[default]
    None,
    Primary,
    Unique,
    MultiValue,
}

/// Declared type split into its parts
///
/// `"INT(11) UNSIGNED"` splits into type name `INT`, length `11` and attribute
/// `UNSIGNED`. When the parenthesized part is not a plain length (for example
/// `DECIMAL(10,2)`) the whole declared type is kept as the type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    pub type_name: String,
    pub length: Option<u32>,
    pub attribute: Option<String>,
}

impl DeclaredType {
    /// Best-effort parse of a declared type. Never fails.
    pub fn parse(declared: &str) -> Self {
        let declared = declared.trim();

        let (base, attribute) = match declared.split_once(char::is_whitespace) {
            Some((base, rest)) => {
                let rest = rest.trim();
                (base, (!rest.is_empty()).then(|| rest.to_string()))
            }
            None => (declared, None),
        };

        let Some((type_name, tail)) = base.split_once('(') else {
            return Self {
                type_name: base.to_string(),
                length: None,
                attribute,
            };
        };

        match tail
            .strip_suffix(')')
            .and_then(|len| len.trim().parse::<u32>().ok())
        {
            Some(length) if !type_name.is_empty() => Self {
                type_name: type_name.to_string(),
                length: Some(length),
                attribute,
            },
            _ => Self::unparsed(declared),
        }
    }

    fn unparsed(declared: &str) -> Self {
        Self {
            type_name: declared.to_string(),
            length: None,
            attribute: None,
        }
    }
}

/// Column descriptor representing one field of an introspected table
///
/// # Example
///
/// ```rust
/// use sqlite_backup_sdk::models::{ColumnDescriptor, KeyRole};
///
/// let column = ColumnDescriptor::new("id", "INT(11) UNSIGNED").with_key_role(KeyRole::Primary);
/// assert_eq!(column.type_name, "INT");
/// assert_eq!(column.length, Some(11));
/// assert_eq!(column.attribute.as_deref(), Some("UNSIGNED"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Type string exactly as the catalog reported it (e.g. "VARCHAR(255)")
    pub declared_type: String,
    /// Base type name without length (e.g. "VARCHAR")
    pub type_name: String,
    /// Parenthesized length, if the declared type carried a plain one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Trailing attribute (e.g. "UNSIGNED")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Whether the column allows NULL values (default: true)
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Default expression text as stored in the catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default)]
    pub key_role: KeyRole,
    /// Catalog name of the index behind a `MultiValue` role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ColumnDescriptor {
    /// Create a new nullable column with no default and no key role
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        let declared_type = declared_type.into();
        let DeclaredType {
            type_name,
            length,
            attribute,
        } = DeclaredType::parse(&declared_type);

        Self {
            name: name.into(),
            declared_type,
            type_name,
            length,
            attribute,
            nullable: true,
            default_value: None,
            auto_increment: false,
            key_role: KeyRole::None,
            index_name: None,
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = auto_increment;
        self
    }

    pub fn with_key_role(mut self, key_role: KeyRole) -> Self {
        self.key_role = key_role;
        self
    }

    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    /// Render type name, length and attribute back into DDL form
    pub fn render_type(&self) -> String {
        let mut rendered = self.type_name.clone();
        if let Some(length) = self.length {
            rendered.push_str(&format!("({length})"));
        }
        if let Some(attribute) = &self.attribute {
            if !rendered.is_empty() {
                rendered.push(' ');
            }
            rendered.push_str(attribute);
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_with_length_and_attribute() {
        let parsed = DeclaredType::parse("INT(11) UNSIGNED");
        assert_eq!(parsed.type_name, "INT");
        assert_eq!(parsed.length, Some(11));
        assert_eq!(parsed.attribute.as_deref(), Some("UNSIGNED"));
    }

    #[test]
    fn test_parse_plain_type() {
        let parsed = DeclaredType::parse("TEXT");
        assert_eq!(parsed.type_name, "TEXT");
        assert_eq!(parsed.length, None);
        assert_eq!(parsed.attribute, None);
    }

    #[test]
    fn test_parse_multi_word_attribute_is_kept_whole() {
        let parsed = DeclaredType::parse("UNSIGNED BIG INT");
        assert_eq!(parsed.type_name, "UNSIGNED");
        assert_eq!(parsed.attribute.as_deref(), Some("BIG INT"));
    }

    #[test]
    fn test_parse_precision_does_not_fabricate_length() {
        let parsed = DeclaredType::parse("DECIMAL(10,2)");
        assert_eq!(parsed.type_name, "DECIMAL(10,2)");
        assert_eq!(parsed.length, None);
        assert_eq!(parsed.attribute, None);
    }

    #[test]
    fn test_parse_unclosed_paren() {
        let parsed = DeclaredType::parse("VARCHAR(50 BINARY");
        assert_eq!(parsed.type_name, "VARCHAR(50 BINARY");
        assert_eq!(parsed.length, None);
        assert_eq!(parsed.attribute, None);
    }

    #[test]
    fn test_parse_empty_type() {
        let parsed = DeclaredType::parse("");
        assert_eq!(parsed.type_name, "");
        assert_eq!(parsed.length, None);
    }

    #[test]
    fn test_render_type_round_trips() {
        for declared in ["VARCHAR(255)", "INT(11) UNSIGNED", "DECIMAL(10,2)", "TEXT", ""] {
            let column = ColumnDescriptor::new("c", declared);
            assert_eq!(column.render_type(), declared);
        }
    }

    #[test]
    fn test_key_role_serializes_snake_case() {
        let json = serde_json::to_string(&KeyRole::MultiValue).unwrap();
        assert_eq!(json, "\"multi_value\"");
    }
}
