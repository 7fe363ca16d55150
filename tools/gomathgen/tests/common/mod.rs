#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const ASIN_GO: &str = "// Copyright 2009 The Go Authors. All rights reserved.

package math

/*
	Floating-point arcsine and arccosine.

	They are implemented by computing the arctangent
	after appropriate range reduction.
*/

// Asin returns the arcsine, in radians, of x.
//
// Special cases are:
//
//	Asin(±0) = ±0
//	Asin(x) = NaN if x < -1 or x > 1
func Asin(x float64) float64 {
	if x == 0 {
		return x /* special case */
	}
	return x
}

/* Angle is measured in radians. */
type Angle float64
";

pub const SQRT_GO: &str = "package math

// Sqrt returns the square root of x.
func Sqrt(x float64) float64 {
	return sqrt(x)
}

func sqrt(x float64) float64 {
	return x
}
";

pub const FREXP_GO: &str = "package math

// Frexp breaks f into a normalized fraction
// and an integral power of two.
func Frexp(f float64) (frac float64, exp int) {
	return frexp(f)
}

func frexp(f float64) (frac float64, exp int) {
	if f == 0 {
		return f, 0
	}
	return f, 1
}
";

pub const HYPOT_GO: &str = "package math

func Hypot(p, q float64) float64 {
	return p + q
}

func Sincos(x float64) (sin, cos float64) {
	return x, x
}

func Ldexp(frac float64, exp int) float64 {
	return frac
}
";

pub const CONST_GO: &str = "package math

// Mathematical constants.
const (
	E  = 2.71828182845904523536028747135266249775724709369995957496696763
	Pi = 3.14159265358979323846264338327950288419716939937510582097494459

	uvnan = 0x7FF8000000000001
)
";

pub const VARS_GO: &str = "package math

var useFMA = false

// Tables used by the gamma function.
var (
	GammaP = []float64{1.6, 2.0}
	gammaQ = []float64{0.5}
)
";

pub const UNSAFE_GO: &str = "package math

import \"unsafe\"

// Float64bits returns the IEEE 754 binary representation of f.
func Float64bits(f float64) uint64 { return *(*uint64)(unsafe.Pointer(&f)) }

// A Bits holds raw float bits.
type Bits uint64

// Interval is a closed range.
type (
	Interval struct {
		Lo, Hi float64
	}
	Radians float64
	span    int
)

func (b Bits) Float() float64 { return 0 }
";

pub const TEST_GO: &str = "package math_test

func TestNothing(t *testing.T) {}
";

pub const IGNORED_GO: &str = "//go:build ignore

package main

this is not Go at all {
";

/// Lays out a small math-like package under `dir`.
pub fn write_fixture(dir: &Path) {
    let files = [
        ("asin.go", ASIN_GO),
        ("sqrt.go", SQRT_GO),
        ("frexp.go", FREXP_GO),
        ("hypot.go", HYPOT_GO),
        ("const.go", CONST_GO),
        ("vars.go", VARS_GO),
        ("unsafe.go", UNSAFE_GO),
        ("sqrt_test.go", TEST_GO),
        ("mkgen.go", IGNORED_GO),
    ];
    for (name, text) in files {
        fs::write(dir.join(name), text).unwrap();
    }
}
