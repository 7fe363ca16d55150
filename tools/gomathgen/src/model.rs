//! Declaration model: four ordered collections of flat records, ready for the
//! emitter's templates.

use gomathgen_parser::{is_exported, GenDecl, Spec};
use serde::Serialize;

use crate::app::config::GeneratorConfig;
use crate::classify::classify_function;
use crate::scanner::ScannedDecls;

/// Parameter names sharing one type, as in `x, y float64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamGroup {
    pub names: Vec<String>,
    pub ty: String,
}

impl ParamGroup {
    pub fn render(&self) -> String {
        format!("{} {}", self.names.join(", "), self.ty)
    }
}

pub fn render_params(groups: &[ParamGroup]) -> String {
    groups
        .iter()
        .map(ParamGroup::render)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    pub name: String,
    pub original_params: Vec<ParamGroup>,
    pub generic_params: Vec<ParamGroup>,
    pub cast_expressions: Vec<String>,
    /// Empty unless the function has exactly one result field.
    pub return_type: String,
    pub is_generic: bool,
    pub original_signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantRecord {
    pub name: String,
    pub value_expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableRecord {
    pub name: String,
    pub value_expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRecord {
    pub name: String,
    pub declaration_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeclarationModel {
    pub functions: Vec<FunctionRecord>,
    pub constants: Vec<ConstantRecord>,
    pub variables: Vec<VariableRecord>,
    pub types: Vec<TypeRecord>,
}

impl DeclarationModel {
    pub fn generic_count(&self) -> usize {
        self.functions.iter().filter(|f| f.is_generic).count()
    }
}

pub fn build_model(scanned: ScannedDecls, config: &GeneratorConfig) -> DeclarationModel {
    DeclarationModel {
        functions: scanned
            .functions
            .iter()
            .map(|func| classify_function(func, config))
            .collect(),
        constants: exported_values(&scanned.constants)
            .map(|(name, value_expression)| ConstantRecord {
                name,
                value_expression,
            })
            .collect(),
        variables: exported_values(&scanned.variables)
            .map(|(name, value_expression)| VariableRecord {
                name,
                value_expression,
            })
            .collect(),
        types: exported_types(&scanned.types).collect(),
    }
}

// A name without its own initializer (iota continuation, `var X T`) gets an
// empty value.
fn exported_values(decls: &[GenDecl]) -> impl Iterator<Item = (String, String)> + '_ {
    decls
        .iter()
        .flat_map(|decl| decl.specs.iter())
        .filter_map(|spec| match spec {
            Spec::Value(value) => Some(value),
            _ => None,
        })
        .flat_map(|value| {
            value.names.iter().enumerate().filter_map(move |(i, name)| {
                is_exported(name).then(|| {
                    (
                        name.clone(),
                        value.values.get(i).cloned().unwrap_or_default(),
                    )
                })
            })
        })
}

fn exported_types(decls: &[GenDecl]) -> impl Iterator<Item = TypeRecord> + '_ {
    decls.iter().flat_map(|decl| {
        decl.specs.iter().filter_map(move |spec| match spec {
            Spec::Type(ty) if is_exported(&ty.name) => Some(TypeRecord {
                name: ty.name.clone(),
                declaration_text: decl.text.clone(),
            }),
            _ => None,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_sources;
    use std::path::PathBuf;

    fn model_for(src: &str) -> DeclarationModel {
        let scanned = scan_sources([(PathBuf::from("x.go"), src.to_string())]).unwrap();
        build_model(scanned, &GeneratorConfig::default())
    }

    #[test]
    fn constants_keep_declaration_order_and_values() {
        let model = model_for(
            "package math\n\nconst (\n\tSqrt2 = 1.414\n\tE = 2.718\n\tln2 = 0.693\n\tLn2 = ln2\n)\n",
        );
        let names: Vec<_> = model.constants.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Sqrt2", "E", "Ln2"]);
        assert_eq!(model.constants[2].value_expression, "ln2");
    }

    #[test]
    fn missing_initializers_become_empty() {
        let model = model_for("package p\n\nconst (\n\tA = iota\n\tB\n)\n\nvar X, Y float64\n");
        assert_eq!(model.constants[1].name, "B");
        assert_eq!(model.constants[1].value_expression, "");
        assert_eq!(model.variables.len(), 2);
        assert!(model.variables.iter().all(|v| v.value_expression.is_empty()));
    }

    #[test]
    fn multi_name_specs_pair_values_by_position() {
        let model = model_for("package p\n\nvar A, b, C = 1, 2, 3\n");
        let pairs: Vec<_> = model
            .variables
            .iter()
            .map(|v| (v.name.as_str(), v.value_expression.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "1"), ("C", "3")]);
    }

    #[test]
    fn grouped_types_share_declaration_text() {
        let model = model_for("package p\n\ntype (\n\tCelsius float64\n\tkelvin float64\n\tFahrenheit float64\n)\n");
        assert_eq!(model.types.len(), 2);
        assert_eq!(model.types[0].declaration_text, model.types[1].declaration_text);
        assert!(model.types[0].declaration_text.starts_with("type ("));
    }

    #[test]
    fn counts_generic_functions() {
        let model = model_for(
            "package math\n\nfunc Sqrt(x float64) float64\nfunc Frexp(f float64) (frac float64, exp int)\n",
        );
        assert_eq!(model.functions.len(), 2);
        assert_eq!(model.generic_count(), 1);
    }
}
