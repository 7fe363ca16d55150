use gomathgen_parser::{parse, Decl, Field, FuncDecl, TypeExpr};

fn funcs(src: &str) -> Vec<FuncDecl> {
    parse(src)
        .unwrap()
        .decls
        .into_iter()
        .filter_map(|d| match d {
            Decl::Func(f) => Some(f),
            _ => None,
        })
        .collect()
}

fn named(names: &[&str], ty: &str) -> Field {
    Field {
        names: names.iter().map(|n| n.to_string()).collect(),
        ty: TypeExpr::Named(ty.to_string()),
    }
}

#[test]
fn function_with_body() {
    let src = r#"package math

// Sqrt returns the square root of x.
func Sqrt(x float64) float64 {
	return sqrt(x)
}
"#;
    let fs = funcs(src);
    assert_eq!(fs.len(), 1);
    let f = &fs[0];
    assert_eq!(f.name, "Sqrt");
    assert!(f.has_body);
    assert!(!f.is_method());
    assert_eq!(f.signature.params, vec![named(&["x"], "float64")]);
    assert_eq!(f.signature.results, vec![Field { names: vec![], ty: TypeExpr::Named("float64".into()) }]);
    assert_eq!(
        f.doc.as_ref().map(|d| d.text.as_str()),
        Some("// Sqrt returns the square root of x.")
    );
}

#[test]
fn grouped_parameter_names_share_type() {
    let fs = funcs("package math\nfunc Max(x, y float64) float64 { return max(x, y) }\n");
    assert_eq!(fs[0].signature.params, vec![named(&["x", "y"], "float64")]);
}

#[test]
fn anonymous_parameters_are_types() {
    let fs = funcs("package p\nfunc Apply(float64, int) float64\n");
    let params = &fs[0].signature.params;
    assert_eq!(params.len(), 2);
    assert!(params.iter().all(|p| p.names.is_empty()));
    assert!(params[0].ty.is_ident("float64"));
    assert!(params[1].ty.is_ident("int"));
    assert!(!fs[0].has_body);
}

#[test]
fn multiple_and_named_results() {
    let src = "package math\nfunc Frexp(f float64) (frac float64, exp int) {\n\treturn frexp(f)\n}\nfunc Modf(f float64) (int float64, frac float64) { return }\n";
    let fs = funcs(src);
    assert_eq!(
        fs[0].signature.results,
        vec![named(&["frac"], "float64"), named(&["exp"], "int")]
    );
    assert_eq!(
        fs[1].signature.results,
        vec![named(&["int"], "float64"), named(&["frac"], "float64")]
    );
}

#[test]
fn methods_have_receivers() {
    let fs = funcs("package p\nfunc (v *Vec) Len() float64 { return 0 }\n");
    assert!(fs[0].is_method());
    assert_eq!(fs[0].name, "Len");
}

#[test]
fn body_less_declarations_follow_each_other() {
    let src = "package math\n\nfunc archSqrt(x float64) float64\n\nfunc archFloor(x float64) float64\n";
    let fs = funcs(src);
    assert_eq!(fs.len(), 2);
    assert!(fs.iter().all(|f| !f.has_body));
}

#[test]
fn signature_display_matches_go_printer() {
    let src = "package math\nfunc Frexp(f float64) (frac float64, exp int)\nfunc Inf(sign int) float64\nfunc Nop()\nfunc Dot(a, b []float64, f func(float64) float64) *float64\n";
    let rendered: Vec<String> = funcs(src)
        .iter()
        .map(|f| f.signature.to_string())
        .collect();
    assert_eq!(
        rendered,
        vec![
            "func(f float64) (frac float64, exp int)",
            "func(sign int) float64",
            "func()",
            "func(a, b []float64, f func(float64) float64) *float64",
        ]
    );
}

#[test]
fn variadic_and_composite_parameter_types() {
    let src = "package p\nfunc F(m map[string]int, c <-chan float64, xs ...float64) [2]float64\n";
    let f = &funcs(src)[0];
    let types: Vec<String> = f.signature.params.iter().map(|p| p.ty.to_string()).collect();
    assert_eq!(types, vec!["map[string]int", "<-chan float64", "...float64"]);
    assert_eq!(f.signature.results[0].ty.to_string(), "[2]float64");
}

#[test]
fn type_parameters_are_recorded() {
    let src = "package p\nfunc Abs[T ~int | ~float64](x T) T { return x }\n";
    let f = &funcs(src)[0];
    assert_eq!(f.type_params.len(), 1);
    assert_eq!(f.type_params[0].names, vec!["T".to_string()]);
    assert_eq!(f.type_params[0].ty.to_string(), "~int | ~float64");
}

#[test]
fn braces_in_body_strings_do_not_confuse_skipping() {
    let src = "package p\nfunc F() string {\n\treturn \"}\"\n}\nfunc G() {}\n";
    let fs = funcs(src);
    assert_eq!(fs.len(), 2);
    assert_eq!(fs[1].name, "G");
}

#[test]
fn constant_length_array_parameter() {
    let fs = funcs("package math\n\nfunc Dot(a, b [N]float64, s [2*N]int) float64 { return 0 }\n");
    let params = &fs[0].signature.params;
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].names, vec!["a", "b"]);
    assert_eq!(
        params[0].ty,
        TypeExpr::Array {
            len: "N".into(),
            elem: Box::new(TypeExpr::Named("float64".into())),
        }
    );
    assert_eq!(params[1].names, vec!["s"]);
    assert_eq!(params[1].ty.to_string(), "[2*N]int");
}

#[test]
fn anonymous_instantiated_parameter_stays_a_type() {
    let fs = funcs("package math\n\nfunc Keys(Set[int], Pair[K, V]) int\n");
    let params = &fs[0].signature.params;
    assert_eq!(params.len(), 2);
    assert!(params.iter().all(|p| p.names.is_empty()));
    assert!(matches!(params[0].ty, TypeExpr::Instance { .. }));
    assert_eq!(params[1].ty.to_string(), "Pair[K, V]");
}

#[test]
fn block_comment_header_before_function() {
    let src = "package math\n\n/*\n\tFloating-point arcsine and arccosine.\n*/\n\n// Asin returns the arcsine, in radians, of x.\nfunc Asin(x float64) float64 { return x }\n";
    let fs = funcs(src);
    assert_eq!(fs.len(), 1);
    assert_eq!(fs[0].name, "Asin");
    assert_eq!(
        fs[0].doc.as_ref().map(|d| d.text.as_str()),
        Some("// Asin returns the arcsine, in radians, of x.")
    );
}
