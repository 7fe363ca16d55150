//! Declaration classifier: decides whether a function can be wrapped once over
//! a numeric type parameter by casting through the native float type.

use gomathgen_parser::{Field, FuncDecl};

use crate::app::config::GeneratorConfig;
use crate::model::{FunctionRecord, ParamGroup};

/// Every parameter is declared as the bare native float identifier. Vacuously
/// true for an empty list.
pub fn params_are_native(params: &[Field], native: &str) -> bool {
    params.iter().all(|field| field.ty.is_ident(native))
}

/// Exactly one result field, carrying at most one name, of the native type.
pub fn returns_single_native(results: &[Field], native: &str) -> bool {
    match results {
        [single] => single.names.len() <= 1 && single.ty.is_ident(native),
        _ => false,
    }
}

pub fn classify_function(func: &FuncDecl, config: &GeneratorConfig) -> FunctionRecord {
    let native = config.native_float.as_str();
    let signature = &func.signature;

    let mut original_params = Vec::with_capacity(signature.params.len());
    let mut generic_params = Vec::with_capacity(signature.params.len());
    let mut cast_expressions = Vec::new();
    let mut position = 0usize;

    for field in &signature.params {
        let names = argument_names(field, &mut position);
        cast_expressions.extend(names.iter().map(|name| format!("{native}({name})")));
        original_params.push(ParamGroup {
            names: names.clone(),
            ty: field.ty.to_string(),
        });
        generic_params.push(ParamGroup {
            names,
            ty: config.type_param.clone(),
        });
    }

    let return_type = match signature.results.as_slice() {
        [single] => single.ty.to_string(),
        _ => String::new(),
    };

    let is_generic = func.type_params.is_empty()
        && params_are_native(&signature.params, native)
        && returns_single_native(&signature.results, native);

    FunctionRecord {
        name: func.name.clone(),
        original_params,
        generic_params,
        cast_expressions,
        return_type,
        is_generic,
        original_signature: signature.to_string(),
    }
}

// Anonymous and blank parameters are named `argN` by their position in the
// flattened parameter list.
fn argument_names(field: &Field, position: &mut usize) -> Vec<String> {
    if field.names.is_empty() {
        let name = format!("arg{position}");
        *position += 1;
        return vec![name];
    }
    field
        .names
        .iter()
        .map(|name| {
            let name = if name == "_" {
                format!("arg{position}")
            } else {
                name.clone()
            };
            *position += 1;
            name
        })
        .collect()
}
