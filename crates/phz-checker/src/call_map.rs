//! Builtin function signatures.
//!
//! Each entry is `(name, return type, params)` where a parameter name may be
//! prefixed with `&` (by reference), suffixed with `=` (optional) or be `...`
//! (variadic). Types use the textual union form. The table is parsed once on
//! first use.

use once_cell::sync::Lazy;
use phz_solver::{AtomicType, UnionType};
use rustc_hash::FxHashMap;
use tracing::warn;

use crate::symbols::{FunctionSignature, ParamInfo};

type CallMapEntry = (&'static str, &'static str, &'static [(&'static str, &'static str)]);

const BUILTIN_FUNCTIONS: &[CallMapEntry] = &[
    ("array_filter", "array", &[("input", "array"), ("callback=", "mixed"), ("mode=", "int")]),
    ("array_key_exists", "bool", &[("key", "mixed"), ("search", "array")]),
    ("array_keys", "array", &[("input", "array"), ("search_value=", "mixed"), ("strict=", "bool")]),
    ("array_map", "array", &[("callback", "mixed"), ("input1", "array"), ("...", "array")]),
    ("array_merge", "array", &[("arr1", "array"), ("...", "array")]),
    ("array_pop", "mixed", &[("&stack", "array")]),
    ("array_push", "int", &[("&stack", "array"), ("var", "mixed"), ("...", "mixed")]),
    ("array_values", "array", &[("input", "array")]),
    ("class_exists", "bool", &[("classname", "string"), ("autoload=", "bool")]),
    ("count", "int", &[("var", "array"), ("mode=", "int")]),
    ("define", "bool", &[("constant_name", "string"), ("value", "mixed"), ("case_insensitive=", "bool")]),
    ("defined", "bool", &[("constant_name", "string")]),
    ("die", "void", &[("status=", "mixed")]),
    ("exit", "void", &[("status=", "mixed")]),
    ("explode", "array<int, string>", &[("separator", "string"), ("str", "string"), ("limit=", "int")]),
    ("extract", "int", &[("&arg", "array"), ("extract_type=", "int"), ("prefix=", "string")]),
    ("function_exists", "bool", &[("function_name", "string")]),
    ("get_class", "string", &[("object=", "mixed")]),
    ("implode", "string", &[("glue", "string"), ("pieces", "array")]),
    ("in_array", "bool", &[("needle", "mixed"), ("haystack", "array"), ("strict=", "bool")]),
    ("intval", "int", &[("var", "mixed"), ("base=", "int")]),
    ("is_array", "bool", &[("var", "mixed")]),
    ("is_callable", "bool", &[("var", "mixed"), ("syntax_only=", "bool"), ("&callable_name=", "string")]),
    ("is_int", "bool", &[("var", "mixed")]),
    ("is_null", "bool", &[("var", "mixed")]),
    ("is_string", "bool", &[("var", "mixed")]),
    ("json_encode", "string|false", &[("value", "mixed"), ("options=", "int"), ("depth=", "int")]),
    ("max", "mixed", &[("value", "mixed"), ("...", "mixed")]),
    ("method_exists", "bool", &[("object", "mixed"), ("method", "string")]),
    ("microtime", "string|float", &[("get_as_float=", "bool")]),
    ("min", "mixed", &[("value", "mixed"), ("...", "mixed")]),
    ("preg_match", "int|false", &[("pattern", "string"), ("subject", "string"), ("&subpatterns=", "array"), ("flags=", "int"), ("offset=", "int")]),
    ("printf", "int", &[("format", "string"), ("...", "mixed")]),
    ("round", "float", &[("number", "float"), ("precision=", "int")]),
    ("sort", "bool", &[("&arg", "array"), ("sort_flags=", "int")]),
    ("sprintf", "string", &[("format", "string"), ("...", "mixed")]),
    ("str_replace", "string|array", &[("search", "string|array"), ("replace", "string|array"), ("subject", "string|array"), ("&replace_count=", "int")]),
    ("strlen", "int", &[("str", "string")]),
    ("strtolower", "string", &[("str", "string")]),
    ("trim", "string", &[("str", "string"), ("character_mask=", "string")]),
    ("var_dump", "void", &[("var", "mixed"), ("...", "mixed")]),
    ("var_export", "string|null", &[("var", "mixed"), ("return=", "bool")]),
];

static CALL_MAP: Lazy<FxHashMap<&'static str, FunctionSignature>> = Lazy::new(|| {
    BUILTIN_FUNCTIONS
        .iter()
        .map(|(name, return_type, params)| (*name, parse_entry(name, return_type, params)))
        .collect()
});

fn parse_type(function: &str, source: &str) -> UnionType {
    source.parse().unwrap_or_else(|err| {
        warn!(function, source, %err, "unparseable builtin type; using mixed");
        UnionType::mixed()
    })
}

fn parse_entry(name: &str, return_type: &str, params: &[(&str, &str)]) -> FunctionSignature {
    let mut signature = FunctionSignature::new(name).returning(parse_type(name, return_type));
    for (raw_name, param_type) in params {
        let declared_type = parse_type(name, param_type);
        if *raw_name == "..." {
            signature = signature.with_param(ParamInfo::new("...", declared_type).variadic());
            continue;
        }
        let by_ref = raw_name.starts_with('&');
        let optional = raw_name.ends_with('=');
        let param_name = raw_name.trim_start_matches('&').trim_end_matches('=');
        let mut param = ParamInfo::new(param_name, declared_type);
        if by_ref {
            param = param.by_ref();
        }
        if optional {
            param = param.optional();
        }
        signature = signature.with_param(param);
    }
    signature
}

/// The builtin named `name`, if any.
pub fn builtin_signature(name: &str) -> Option<&'static FunctionSignature> {
    CALL_MAP.get(name.trim_start_matches('\\').to_ascii_lowercase().as_str())
}

#[must_use]
pub fn is_builtin(name: &str) -> bool {
    builtin_signature(name).is_some()
}

/// The return type of a builtin call given its arguments' inferred types.
///
/// `arg_types[i]` is `None` when argument `i` has no inferred type.
#[must_use]
pub fn builtin_return_type(
    signature: &FunctionSignature,
    arg_types: &[Option<&UnionType>],
) -> UnionType {
    let declared = || signature.return_type.clone().unwrap_or_else(UnionType::mixed);
    let first_arg = arg_types.first().copied().flatten();
    match signature.name.as_str() {
        "array_filter" => first_arg.cloned().unwrap_or_else(declared),
        "array_values" => match first_arg.and_then(|ty| ty.generic_param("array")) {
            Some(array) => UnionType::generic(
                "array",
                vec![UnionType::int(), array.value_param().cloned().unwrap_or_else(UnionType::mixed)],
            ),
            None => declared(),
        },
        "array_keys" => match first_arg.and_then(|ty| ty.generic_param("array")) {
            Some(array) => UnionType::generic(
                "array",
                vec![UnionType::int(), array.key_param().cloned().unwrap_or_else(UnionType::mixed)],
            ),
            None => declared(),
        },
        "array_merge" => {
            let mut merged: Option<UnionType> = None;
            for arg_type in arg_types {
                let Some(arg_type) = arg_type else {
                    return declared();
                };
                merged = Some(match merged {
                    Some(acc) => acc.combine(arg_type),
                    None => (*arg_type).clone(),
                });
            }
            merged
                .filter(|ty| ty.iter().all(AtomicType::is_array_like))
                .unwrap_or_else(declared)
        }
        _ => declared(),
    }
}

#[cfg(test)]
#[path = "../tests/call_map_tests.rs"]
mod call_map_tests;
