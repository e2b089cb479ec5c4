//! AST evaluation.
//!
//! Plain IEEE semantics throughout: division by zero yields an infinity,
//! domain errors yield NaN. The caller rejects non-finite results, so no
//! failure paths exist here.

use serde::{Deserialize, Serialize};

use crate::calculator::ast::{Constant, Expr, Function};

/// Unit used for trigonometric operands and inverse-trig results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    pub fn toggled(self) -> Self {
        match self {
            AngleUnit::Degrees => AngleUnit::Radians,
            AngleUnit::Radians => AngleUnit::Degrees,
        }
    }
}

impl Expr {
    pub fn evaluate(&self, unit: AngleUnit) -> f64 {
        match self {
            Expr::Number(n) => *n,
            Expr::Constant(c) => c.value(),
            Expr::Add(l, r) => l.evaluate(unit) + r.evaluate(unit),
            Expr::Sub(l, r) => l.evaluate(unit) - r.evaluate(unit),
            Expr::Mul(l, r) => l.evaluate(unit) * r.evaluate(unit),
            Expr::Div(l, r) => l.evaluate(unit) / r.evaluate(unit),
            Expr::Rem(l, r) => l.evaluate(unit) % r.evaluate(unit),
            Expr::Pow(l, r) => l.evaluate(unit).powf(r.evaluate(unit)),
            Expr::Neg(e) => -e.evaluate(unit),
            Expr::Call(function, arg) => apply(*function, arg.evaluate(unit), unit),
        }
    }
}

fn apply(function: Function, arg: f64, unit: AngleUnit) -> f64 {
    match function {
        Function::Sin => direct_angle(arg, unit).sin(),
        Function::Cos => direct_angle(arg, unit).cos(),
        Function::Tan => direct_angle(arg, unit).tan(),
        Function::Asin => inverse_angle(arg.asin(), unit),
        Function::Acos => inverse_angle(arg.acos(), unit),
        Function::Atan => inverse_angle(arg.atan(), unit),
        Function::Ln => arg.ln(),
        Function::Log => arg.log10(),
        Function::Sqrt => arg.sqrt(),
    }
}

fn direct_angle(arg: f64, unit: AngleUnit) -> f64 {
    match unit {
        AngleUnit::Degrees => arg.to_radians(),
        AngleUnit::Radians => arg,
    }
}

fn inverse_angle(radians: f64, unit: AngleUnit) -> f64 {
    match unit {
        AngleUnit::Degrees => radians.to_degrees(),
        AngleUnit::Radians => radians,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn trig_in_degree_mode_converts() {
        let expr = Expr::Call(Function::Sin, Box::new(Expr::Number(30.0)));
        assert!(close(expr.evaluate(AngleUnit::Degrees), 0.5));
    }

    #[test]
    fn trig_in_radian_mode_is_raw() {
        let expr = Expr::Call(
            Function::Sin,
            Box::new(Expr::Constant(Constant::Pi)),
        );
        assert!(close(expr.evaluate(AngleUnit::Radians), 0.0));
    }

    #[test]
    fn inverse_trig_reports_in_the_active_unit() {
        let expr = Expr::Call(Function::Asin, Box::new(Expr::Number(0.5)));
        assert!(close(expr.evaluate(AngleUnit::Degrees), 30.0));
        assert!(close(
            expr.evaluate(AngleUnit::Radians),
            std::f64::consts::FRAC_PI_6
        ));
    }

    #[test]
    fn logarithms() {
        let ln = Expr::Call(Function::Ln, Box::new(Expr::Constant(Constant::E)));
        assert!(close(ln.evaluate(AngleUnit::Radians), 1.0));
        let log = Expr::Call(Function::Log, Box::new(Expr::Number(100.0)));
        assert!(close(log.evaluate(AngleUnit::Radians), 2.0));
    }

    #[test]
    fn division_by_zero_is_infinite() {
        let expr = Expr::Div(Box::new(Expr::Number(5.0)), Box::new(Expr::Number(0.0)));
        assert!(expr.evaluate(AngleUnit::Degrees).is_infinite());
    }

    #[test]
    fn domain_error_is_nan() {
        let expr = Expr::Call(Function::Asin, Box::new(Expr::Number(2.0)));
        assert!(expr.evaluate(AngleUnit::Degrees).is_nan());
    }

    #[test]
    fn remainder_keeps_dividend_sign() {
        let expr = Expr::Rem(Box::new(Expr::Number(-7.0)), Box::new(Expr::Number(3.0)));
        assert_eq!(expr.evaluate(AngleUnit::Degrees), -1.0);
    }
}
