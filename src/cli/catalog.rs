//! Catalog CLI commands: `layouts` and `options`.

use crate::cli::common::{print_json, CliResult};
use crate::models::{BaseField, LayoutKind};
use clap::Args;
use serde::Serialize;

/// List supported layouts
#[derive(Args, Debug)]
pub struct LayoutsArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// List configuration fields and their options
#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Layout entry as listed by the CLI and the web API.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LayoutInfo {
    /// Option id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Number of key positions
    pub key_count: usize,
}

/// Field entry as listed by the CLI and the web API.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field id
    pub field: &'static str,
    /// Valid option ids in declaration order
    pub options: Vec<&'static str>,
}

/// All layouts in declaration order.
#[must_use]
pub fn layout_catalog() -> Vec<LayoutInfo> {
    LayoutKind::ALL
        .iter()
        .map(|layout| LayoutInfo {
            id: layout.id(),
            name: layout.display_name(),
            key_count: layout.key_count(),
        })
        .collect()
}

/// All base fields with their options.
#[must_use]
pub fn option_catalog() -> Vec<FieldInfo> {
    BaseField::ALL
        .iter()
        .map(|field| FieldInfo {
            field: field.id(),
            options: field.option_ids(),
        })
        .collect()
}

impl LayoutsArgs {
    /// Execute layouts command
    pub fn execute(&self) -> CliResult<()> {
        let layouts = layout_catalog();
        if self.json {
            return print_json(&layouts);
        }

        for layout in layouts {
            println!("{:<12} {:<14} {} keys", layout.id, layout.name, layout.key_count);
        }
        Ok(())
    }
}

impl OptionsArgs {
    /// Execute options command
    pub fn execute(&self) -> CliResult<()> {
        let fields = option_catalog();
        if self.json {
            return print_json(&fields);
        }

        for field in fields {
            println!("{}: {}", field.field, field.options.join(", "));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_catalog() {
        let layouts = layout_catalog();
        assert_eq!(layouts.len(), 4);
        assert_eq!(layouts[1].id, "sixty_five");
        assert_eq!(layouts[1].key_count, 68);
    }

    #[test]
    fn test_option_catalog_follows_field_order() {
        let fields = option_catalog();
        let ids: Vec<_> = fields.iter().map(|f| f.field).collect();
        assert_eq!(
            ids,
            ["layout", "case", "plate", "switches", "keycaps", "colorway"]
        );
        assert!(fields[2].options.contains(&"brass"));
    }
}
