//! Parameter binding: positional/named argument resolution against a
//! primitive's declared parameter schema, including diameter/radius
//! aliasing and the special-variable auxiliary slot map.

use std::collections::HashMap;

use config::constants::{DEFAULT_FA, DEFAULT_FN, DEFAULT_FS};

use crate::diagnostic::Diagnostic;
use crate::extract::ExtractedArgument;
use crate::span::SourceLocation;
use crate::value::ParameterValue;

/// Pairs a schema slot name with its default, in declared order.
pub struct ParameterSchema<'a> {
    pub slots: &'a [(&'a str, ParameterValue)],
}

/// The result of binding a call's arguments against a schema: a
/// keyword-indexed bag plus the auxiliary `$`-prefixed slots.
pub struct BoundArguments {
    values: HashMap<String, ParameterValue>,
    specials: HashMap<String, f64>,
    diameters: HashMap<String, f64>,
}

impl BoundArguments {
    pub fn get(&self, name: &str) -> &ParameterValue {
        self.values.get(name).unwrap_or(&ParameterValue::Undefined)
    }

    /// The original (un-halved) diameter value bound through the `d`/`d1`/`d2`
    /// alias for `radius_slot` (`"r"`/`"r1"`/`"r2"`), if a diameter form was
    /// given for it.
    pub fn diameter(&self, radius_slot: &str) -> Option<f64> {
        self.diameters.get(radius_slot).copied()
    }

    pub fn fn_(&self) -> f64 {
        *self.specials.get("$fn").unwrap_or(&DEFAULT_FN)
    }

    pub fn fa(&self) -> f64 {
        *self.specials.get("$fa").unwrap_or(&DEFAULT_FA)
    }

    pub fn fs(&self) -> f64 {
        *self.specials.get("$fs").unwrap_or(&DEFAULT_FS)
    }
}

/// Diameter→radius aliases: `(diameter_name, radius_name, halve)`.
const RADIUS_ALIASES: &[(&str, &str)] = &[("d", "r"), ("d1", "r1"), ("d2", "r2")];

/// Binds extracted call arguments against `schema`, resolving named/
/// positional slots, diameter/radius aliasing (diameter wins), and
/// recording unknown extras as diagnostics without failing the call.
pub fn bind_arguments(
    args: &[ExtractedArgument],
    schema: &ParameterSchema,
    location: SourceLocation,
    diagnostics: &mut Vec<Diagnostic>,
) -> BoundArguments {
    let mut values: HashMap<String, ParameterValue> = schema
        .slots
        .iter()
        .map(|(name, default)| (name.to_string(), default.clone()))
        .collect();
    let mut specials = HashMap::new();
    let mut diameters: HashMap<&str, f64> = HashMap::new();
    let mut original_diameters: HashMap<String, f64> = HashMap::new();
    let mut bound_by_name: Vec<&str> = Vec::new();

    for arg in args {
        if let Some(name) = arg.name.as_deref() {
            if let Some(stripped) = name.strip_prefix('$') {
                if let Some(n) = arg.value.as_number() {
                    specials.insert(format!("${stripped}"), n);
                }
                continue;
            }
            if let Some((_, radius_name)) = RADIUS_ALIASES.iter().find(|(d, _)| *d == name) {
                if let Some(n) = arg.value.as_number() {
                    diameters.insert(*radius_name, n / 2.0);
                    original_diameters.insert(radius_name.to_string(), n);
                }
                continue;
            }
            if schema.slots.iter().any(|(slot, _)| *slot == name) {
                values.insert(name.to_string(), arg.value.clone());
                bound_by_name.push(name);
            } else {
                diagnostics.push(
                    Diagnostic::warning(format!("unknown parameter: {name}"), location)
                        .with_hint("this argument was ignored"),
                );
            }
        }
    }

    let mut positional = args.iter().filter(|a| a.name.is_none());
    for (slot_name, _) in schema.slots {
        if bound_by_name.contains(slot_name) {
            continue;
        }
        if let Some(arg) = positional.next() {
            values.insert(slot_name.to_string(), arg.value.clone());
        }
    }
    for extra in positional {
        diagnostics.push(Diagnostic::warning("extra positional argument ignored", extra.value_location(location)));
    }

    // Diameter form wins over any radius form already bound.
    for (radius_name, halved) in diameters {
        values.insert(radius_name.to_string(), ParameterValue::Number(halved));
    }

    BoundArguments { values, specials, diameters: original_diameters }
}

impl ExtractedArgument {
    fn value_location(&self, fallback: SourceLocation) -> SourceLocation {
        match &self.value {
            ParameterValue::Expression(expr) => expr.location(),
            _ => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::SourceLocation;

    fn schema<'a>(slots: &'a [(&'a str, ParameterValue)]) -> ParameterSchema<'a> {
        ParameterSchema { slots }
    }

    #[test]
    fn named_binds_by_exact_match() {
        let schema_slots = [("size", ParameterValue::Number(1.0)), ("center", ParameterValue::Boolean(false))];
        let args = vec![ExtractedArgument { name: Some("center".into()), value: ParameterValue::Boolean(true) }];
        let mut diagnostics = Vec::new();
        let bound = bind_arguments(&args, &schema(&schema_slots), SourceLocation::sentinel(), &mut diagnostics);
        assert_eq!(*bound.get("center"), ParameterValue::Boolean(true));
        assert_eq!(*bound.get("size"), ParameterValue::Number(1.0));
    }

    #[test]
    fn positional_fills_remaining_slots_in_order() {
        let schema_slots = [("size", ParameterValue::Number(1.0)), ("center", ParameterValue::Boolean(false))];
        let args = vec![
            ExtractedArgument { name: None, value: ParameterValue::Number(10.0) },
            ExtractedArgument { name: None, value: ParameterValue::Boolean(true) },
        ];
        let mut diagnostics = Vec::new();
        let bound = bind_arguments(&args, &schema(&schema_slots), SourceLocation::sentinel(), &mut diagnostics);
        assert_eq!(*bound.get("size"), ParameterValue::Number(10.0));
        assert_eq!(*bound.get("center"), ParameterValue::Boolean(true));
    }

    #[test]
    fn diameter_halves_and_wins_over_radius() {
        let schema_slots = [("r", ParameterValue::Number(1.0))];
        let args = vec![
            ExtractedArgument { name: Some("r".into()), value: ParameterValue::Number(99.0) },
            ExtractedArgument { name: Some("d".into()), value: ParameterValue::Number(10.0) },
        ];
        let mut diagnostics = Vec::new();
        let bound = bind_arguments(&args, &schema(&schema_slots), SourceLocation::sentinel(), &mut diagnostics);
        assert_eq!(*bound.get("r"), ParameterValue::Number(5.0));
        assert_eq!(bound.diameter("r"), Some(10.0));
    }

    #[test]
    fn special_variables_fall_back_to_config_defaults() {
        let args: Vec<ExtractedArgument> = vec![];
        let mut diagnostics = Vec::new();
        let bound = bind_arguments(&args, &schema(&[]), SourceLocation::sentinel(), &mut diagnostics);
        assert_eq!(bound.fn_(), DEFAULT_FN);
        assert_eq!(bound.fa(), DEFAULT_FA);
        assert_eq!(bound.fs(), DEFAULT_FS);
    }

    #[test]
    fn special_variable_argument_overrides_default() {
        let args = vec![ExtractedArgument { name: Some("$fn".into()), value: ParameterValue::Number(64.0) }];
        let mut diagnostics = Vec::new();
        let bound = bind_arguments(&args, &schema(&[]), SourceLocation::sentinel(), &mut diagnostics);
        assert_eq!(bound.fn_(), 64.0);
    }

    #[test]
    fn unknown_named_argument_is_diagnostic_not_failure() {
        let args = vec![ExtractedArgument { name: Some("bogus".into()), value: ParameterValue::Number(1.0) }];
        let mut diagnostics = Vec::new();
        bind_arguments(&args, &schema(&[]), SourceLocation::sentinel(), &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_warning());
    }
}
