use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Int,
    Float,
}

/// Static definition of one tunable strategy parameter, surfaced through the
/// algorithm catalog so callers know the valid range and default.
#[derive(Debug, Clone, Serialize)]
pub struct ParamDef {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

/// Merge caller-supplied parameters against their definitions: unknown keys
/// are dropped, missing or non-finite values take the definition default.
pub fn merge_params(
    defs: &[ParamDef],
    supplied: &HashMap<String, f64>,
) -> HashMap<String, f64> {
    defs.iter()
        .map(|def| {
            let value = supplied
                .get(def.name)
                .copied()
                .filter(|v| v.is_finite())
                .unwrap_or(def.default);
            (def.name.to_string(), value)
        })
        .collect()
}

/// Extract a parameter as f64 with a default value
pub fn get_param_f64(params: &HashMap<String, f64>, key: &str, default: f64) -> f64 {
    params.get(key).copied().unwrap_or(default)
}

/// Extract a parameter as usize with a default value, rounding fractions
pub fn get_param_usize(params: &HashMap<String, f64>, key: &str, default: usize) -> usize {
    params
        .get(key)
        .copied()
        .filter(|v| v.is_finite())
        .map(|v| v.round().max(0.0) as usize)
        .unwrap_or(default)
}
