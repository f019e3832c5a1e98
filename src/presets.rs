//! Example functions offered to new users

use serde::Serialize;

/// A named example expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    /// Short name used on the command line
    pub name: &'static str,
    /// How the function is usually written
    pub label: &'static str,
    /// Expression text in the calculator's syntax
    pub expression: &'static str,
    pub description: &'static str,
}

/// The built-in examples, in display order
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "square",
        label: "x^2",
        expression: "x**2",
        description: "Continuous everywhere; delta shrinks as |a| grows",
    },
    Preset {
        name: "sine",
        label: "sin(x)",
        expression: "np.sin(x)",
        description: "Continuous everywhere with slope at most 1",
    },
    Preset {
        name: "exp",
        label: "exp(x)",
        expression: "np.exp(x)",
        description: "Continuous everywhere; steep for large x",
    },
    Preset {
        name: "reciprocal",
        label: "1/x (x != 0)",
        expression: "1/x",
        description: "Undefined at 0, so no delta exists there",
    },
];

/// Look up a preset by name, ignoring case
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::CompiledExpression;

    #[test]
    fn test_every_preset_compiles() {
        for preset in PRESETS {
            assert!(
                CompiledExpression::compile(preset.expression).is_ok(),
                "preset '{}' does not compile",
                preset.name
            );
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(find_preset("Sine").map(|p| p.expression), Some("np.sin(x)"));
        assert!(find_preset("cube").is_none());
    }
}
