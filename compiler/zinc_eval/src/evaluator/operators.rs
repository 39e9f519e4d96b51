//! Binary and unary operator implementations for the evaluator.
//!
//! The operand kinds are fixed (int, bool, set of int), so dispatch is a
//! plain match on `(Value, Value)` pairs. `/\` and `\/` short-circuit and
//! are handled before the right operand is evaluated.

use std::rc::Rc;

use zinc_ir::{BinaryOp, ExprId, UnaryOp};

use super::Evaluator;
use crate::errors::{division_by_zero, integer_overflow, type_mismatch, EvalError, EvalResult};
use crate::{IntSetVal, IntVal, Value};

/// Checked arithmetic where the only error case is overflow.
#[inline]
fn checked_arith(result: Option<IntVal>, op: BinaryOp) -> EvalResult<Value> {
    result
        .map(Value::Int)
        .ok_or_else(|| integer_overflow(op.as_symbol()))
}

/// Checked `div`/`mod` with zero guard.
#[inline]
fn checked_div(divisor: IntVal, op: BinaryOp, f: impl FnOnce() -> Option<IntVal>) -> EvalResult<Value> {
    if divisor.is_zero() {
        Err(division_by_zero())
    } else {
        checked_arith(f(), op)
    }
}

fn eval_int_binary(a: IntVal, b: IntVal, op: BinaryOp) -> EvalResult<Value> {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), op),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), op),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), op),
        BinaryOp::Div => checked_div(b, op, || a.checked_div(b)),
        BinaryOp::Mod => checked_div(b, op, || a.checked_rem(b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => Err(operand_mismatch(op, "int", "int")),
    }
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> EvalResult<Value> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        // Reached only when the left operand did not decide the result.
        BinaryOp::And | BinaryOp::Or => Ok(Value::Bool(b)),
        _ => Err(operand_mismatch(op, "bool", "bool")),
    }
}

fn eval_set_binary(a: &IntSetVal, b: &IntSetVal, op: BinaryOp) -> EvalResult<Value> {
    match op {
        BinaryOp::Union => Ok(Value::Set(Rc::new(a.union(b)))),
        BinaryOp::Intersect => Ok(Value::Set(Rc::new(a.intersect(b)))),
        BinaryOp::Diff => Ok(Value::Set(Rc::new(a.difference(b)))),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(operand_mismatch(op, "set of int", "set of int")),
    }
}

/// Evaluate a binary operation on two already evaluated operands.
fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult<Value> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        (Value::Set(a), Value::Set(b)) => eval_set_binary(a, b, op),
        (Value::Int(v), Value::Set(s)) if op == BinaryOp::In => Ok(Value::Bool(s.contains(*v))),
        _ => Err(operand_mismatch(op, left.kind_name(), right.kind_name())),
    }
}

fn evaluate_unary(operand: &Value, op: UnaryOp) -> EvalResult<Value> {
    match (op, operand) {
        (UnaryOp::Neg, Value::Int(v)) => v
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Neg, other) => Err(type_mismatch(op.as_symbol(), "int", other.kind_name())),
        (UnaryOp::Not, other) => Err(type_mismatch(op.as_symbol(), "bool", other.kind_name())),
    }
}

#[cold]
fn operand_mismatch(op: BinaryOp, left: &str, right: &str) -> EvalError {
    let expected = match op {
        BinaryOp::And | BinaryOp::Or => "bool operands",
        BinaryOp::Union | BinaryOp::Intersect | BinaryOp::Diff => "set operands",
        BinaryOp::In => "int and set operands",
        BinaryOp::Eq | BinaryOp::NotEq => "operands of one kind",
        _ => "int operands",
    };
    type_mismatch(op.as_symbol(), expected, &format!("{left} and {right}"))
}

impl Evaluator<'_> {
    pub(super) fn eval_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> EvalResult<Value> {
        let lhs = self.eval(left)?;
        match (op, &lhs) {
            (BinaryOp::And, Value::Bool(false)) => return Ok(Value::Bool(false)),
            (BinaryOp::Or, Value::Bool(true)) => return Ok(Value::Bool(true)),
            _ => {}
        }
        let rhs = self.eval(right)?;
        evaluate_binary(&lhs, &rhs, op)
    }

    pub(super) fn eval_unary(&mut self, op: UnaryOp, operand: ExprId) -> EvalResult<Value> {
        let value = self.eval(operand)?;
        evaluate_unary(&value, op)
    }
}
