//! Text templates for the four generated Go modules.

use std::collections::HashSet;
use std::fmt::{self, Write};

use crate::app::config::GeneratorConfig;
use crate::model::{
    render_params, ConstantRecord, FunctionRecord, TypeRecord, VariableRecord,
};

pub const HEADER: &str = "// Code generated by go:generate; DO NOT EDIT.";

fn preamble(out: &mut String, config: &GeneratorConfig) -> fmt::Result {
    writeln!(out, "{HEADER}")?;
    writeln!(out)?;
    writeln!(out, "package {}", config.output_package)?;
    writeln!(out)?;
    writeln!(out, "import \"{}\"", config.package)
}

// Keeps the import used even when a module ends up with no entries.
fn unused_import_guard(out: &mut String, config: &GeneratorConfig) -> fmt::Result {
    writeln!(out)?;
    writeln!(
        out,
        "var _ = {}.Pi // dummy usage to avoid unused import error.",
        config.qualifier()
    )
}

pub fn render_functions(
    functions: &[FunctionRecord],
    config: &GeneratorConfig,
) -> Result<String, fmt::Error> {
    let pkg = config.qualifier();
    let tp = &config.type_param;
    let mut out = String::new();
    preamble(&mut out, config)?;
    writeln!(out)?;
    writeln!(
        out,
        "// Core functions: wrappers for functions in the standard {} package.",
        config.package
    )?;

    for func in functions {
        let name = &func.name;
        writeln!(out)?;
        if func.is_generic {
            writeln!(out, "// {name} wraps {pkg}.{name} in a generic function.")?;
            writeln!(
                out,
                "func {name}[{tp} {}]({}) {tp} {{",
                config.constraint,
                render_params(&func.generic_params)
            )?;
            writeln!(
                out,
                "\treturn {tp}({pkg}.{name}({}))",
                func.cast_expressions.join(", ")
            )?;
            writeln!(out, "}}")?;
        } else {
            writeln!(out, "// {name} is a direct alias to {pkg}.{name}.")?;
            writeln!(out, "var {name} = {pkg}.{name}")?;
        }
    }
    Ok(out)
}

pub fn render_constants(
    constants: &[ConstantRecord],
    config: &GeneratorConfig,
) -> Result<String, fmt::Error> {
    let names: Vec<&str> = constants.iter().map(|c| c.name.as_str()).collect();
    render_group("const", "constants", &names, config)
}

pub fn render_variables(
    variables: &[VariableRecord],
    config: &GeneratorConfig,
) -> Result<String, fmt::Error> {
    let names: Vec<&str> = variables.iter().map(|v| v.name.as_str()).collect();
    let mut out = render_group("var", "variables", &names, config)?;
    unused_import_guard(&mut out, config)?;
    Ok(out)
}

fn render_group(
    keyword: &str,
    label: &str,
    names: &[&str],
    config: &GeneratorConfig,
) -> Result<String, fmt::Error> {
    let pkg = config.qualifier();
    let mut out = String::new();
    preamble(&mut out, config)?;
    writeln!(out)?;
    writeln!(
        out,
        "// Core {label}: re-exported from the standard {} package.",
        config.package
    )?;
    writeln!(out, "{keyword} (")?;
    for name in names {
        writeln!(out, "\t{name} = {pkg}.{name}")?;
    }
    writeln!(out, ")")?;
    Ok(out)
}

/// A grouped declaration contributing several exported types is written once.
pub fn render_types(types: &[TypeRecord], config: &GeneratorConfig) -> Result<String, fmt::Error> {
    let mut out = String::new();
    preamble(&mut out, config)?;
    writeln!(out)?;
    writeln!(
        out,
        "// Core types: re-exported from the standard {} package.",
        config.package
    )?;

    let mut seen = HashSet::new();
    for ty in types {
        if !seen.insert(ty.declaration_text.as_str()) {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{}", ty.declaration_text)?;
    }
    unused_import_guard(&mut out, config)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParamGroup;

    fn group(names: &[&str], ty: &str) -> ParamGroup {
        ParamGroup {
            names: names.iter().map(|n| n.to_string()).collect(),
            ty: ty.to_string(),
        }
    }

    fn hypot() -> FunctionRecord {
        FunctionRecord {
            name: "Hypot".into(),
            original_params: vec![group(&["p", "q"], "float64")],
            generic_params: vec![group(&["p", "q"], "N")],
            cast_expressions: vec!["float64(p)".into(), "float64(q)".into()],
            return_type: "float64".into(),
            is_generic: true,
            original_signature: "func(p, q float64) float64".into(),
        }
    }

    fn frexp() -> FunctionRecord {
        FunctionRecord {
            name: "Frexp".into(),
            original_params: vec![group(&["f"], "float64")],
            generic_params: vec![group(&["f"], "N")],
            cast_expressions: vec!["float64(f)".into()],
            return_type: String::new(),
            is_generic: false,
            original_signature: "func(f float64) (frac float64, exp int)".into(),
        }
    }

    #[test]
    fn functions_module_wraps_and_aliases() {
        let out = render_functions(&[hypot(), frexp()], &GeneratorConfig::default()).unwrap();
        let expected = "\
// Code generated by go:generate; DO NOT EDIT.

package math

import \"math\"

// Core functions: wrappers for functions in the standard math package.

// Hypot wraps math.Hypot in a generic function.
func Hypot[N Number](p, q N) N {
\treturn N(math.Hypot(float64(p), float64(q)))
}

// Frexp is a direct alias to math.Frexp.
var Frexp = math.Frexp
";
        assert_eq!(out, expected);
    }

    #[test]
    fn constants_module_is_one_group() {
        let constants = vec![
            ConstantRecord {
                name: "E".into(),
                value_expression: "2.718".into(),
            },
            ConstantRecord {
                name: "MaxInt8".into(),
                value_expression: "1<<7 - 1".into(),
            },
        ];
        let out = render_constants(&constants, &GeneratorConfig::default()).unwrap();
        assert!(out.starts_with(HEADER));
        assert!(out.ends_with("const (\n\tE = math.E\n\tMaxInt8 = math.MaxInt8\n)\n"));
        assert!(!out.contains("math.Pi"));
    }

    #[test]
    fn variables_module_carries_import_guard() {
        let out = render_variables(&[], &GeneratorConfig::default()).unwrap();
        assert!(out.contains("var (\n)\n"));
        assert!(out.ends_with("var _ = math.Pi // dummy usage to avoid unused import error.\n"));
    }

    #[test]
    fn types_module_emits_each_group_once() {
        let group_text = "type (\n\tCelsius float64\n\tFahrenheit float64\n)";
        let types = vec![
            TypeRecord {
                name: "Celsius".into(),
                declaration_text: group_text.into(),
            },
            TypeRecord {
                name: "Fahrenheit".into(),
                declaration_text: group_text.into(),
            },
            TypeRecord {
                name: "Matrix".into(),
                declaration_text: "// Matrix is dense.\ntype Matrix [][]float64".into(),
            },
        ];
        let out = render_types(&types, &GeneratorConfig::default()).unwrap();
        assert_eq!(out.matches("Celsius float64").count(), 1);
        assert!(out.contains("\n// Matrix is dense.\ntype Matrix [][]float64\n"));
        assert!(out.ends_with("var _ = math.Pi // dummy usage to avoid unused import error.\n"));
    }

    #[test]
    fn every_module_starts_with_header_and_package() {
        let config = GeneratorConfig::default();
        for out in [
            render_functions(&[], &config).unwrap(),
            render_constants(&[], &config).unwrap(),
            render_variables(&[], &config).unwrap(),
            render_types(&[], &config).unwrap(),
        ] {
            assert!(out.starts_with(
                "// Code generated by go:generate; DO NOT EDIT.\n\npackage math\n"
            ));
        }
    }
}
