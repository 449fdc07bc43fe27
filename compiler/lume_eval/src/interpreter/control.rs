//! Loops, exception handling and pattern matching.

use lume_ir::code::{ArmCode, ArmPattern, CatchCode, Code, Target};
use lume_ir::Span;
use lume_runtime::access::iterate;
use lume_runtime::{no_matching_arm, ControlAction, ExecResult, Value};

use super::{AtSpan, Frame, Interpreter};

/// What a loop does after one run of its body.
enum LoopStep {
    Next,
    Exit,
}

fn loop_step(outcome: ExecResult) -> Result<LoopStep, ControlAction> {
    match outcome {
        Ok(_) | Err(ControlAction::Continue) => Ok(LoopStep::Next),
        Err(ControlAction::Break) => Ok(LoopStep::Exit),
        Err(other) => Err(other),
    }
}

impl Interpreter<'_> {
    pub(super) fn eval_while(&mut self, cond: &Code, body: &Code, frame: &mut Frame) -> ExecResult {
        while self.eval(cond, frame)?.is_truthy() {
            if let LoopStep::Exit = loop_step(self.eval(body, frame))? {
                break;
            }
        }
        Ok(Value::Null)
    }

    /// Iterates a snapshot: lists are copied, maps yield their keys.
    pub(super) fn eval_for(
        &mut self,
        target: &Target,
        iterable: &Code,
        body: &Code,
        scoped: bool,
        span: Span,
        frame: &mut Frame,
    ) -> ExecResult {
        let iterable = self.eval(iterable, frame)?;
        for item in iterate(&iterable).at(span)? {
            if scoped {
                frame.env.push_scope();
            }
            frame.define(target, item);
            let outcome = self.eval(body, frame);
            if scoped {
                frame.env.pop_scope();
            }
            if let LoopStep::Exit = loop_step(outcome)? {
                break;
            }
        }
        Ok(Value::Null)
    }

    /// The catch body's value replaces a failed body's. `finally` runs on
    /// every path and only changes the outcome if it fails itself.
    pub(super) fn eval_try(
        &mut self,
        body: &Code,
        catch: Option<&CatchCode>,
        finally: Option<&Code>,
        frame: &mut Frame,
    ) -> ExecResult {
        let mut outcome = self.eval(body, frame);
        let caught = match (&outcome, catch) {
            (Err(ControlAction::Error(err)), Some(catch)) => {
                tracing::debug!(code = %err.code(), "caught runtime error");
                Some((catch, err.to_value()))
            }
            _ => None,
        };
        if let Some((catch, value)) = caught {
            outcome = self.eval_catch(catch, value, frame);
        }
        if let Some(finally) = finally {
            self.eval(finally, frame)?;
        }
        outcome
    }

    fn eval_catch(&mut self, catch: &CatchCode, caught: Value, frame: &mut Frame) -> ExecResult {
        if catch.scoped {
            frame.env.push_scope();
        }
        if let Some(binding) = &catch.binding {
            frame.define(binding, caught);
        }
        let result = self.eval(&catch.body, frame);
        if catch.scoped {
            frame.env.pop_scope();
        }
        result
    }

    pub(super) fn eval_match(
        &mut self,
        subject: &Code,
        arms: &[ArmCode],
        scoped: bool,
        span: Span,
        frame: &mut Frame,
    ) -> ExecResult {
        let subject = self.eval(subject, frame)?;
        for arm in arms {
            if scoped {
                frame.env.push_scope();
            }
            let outcome = self.eval_arm(arm, &subject, frame);
            if scoped {
                frame.env.pop_scope();
            }
            if let Some(value) = outcome? {
                return Ok(value);
            }
        }
        Err(no_matching_arm(&subject).with_span(span).into())
    }

    /// `None` when the pattern or the guard rejects the subject.
    fn eval_arm(
        &mut self,
        arm: &ArmCode,
        subject: &Value,
        frame: &mut Frame,
    ) -> Result<Option<Value>, ControlAction> {
        if !matches_pattern(&arm.pattern, subject, frame) {
            return Ok(None);
        }
        if let Some(guard) = &arm.guard {
            if !self.eval(guard, frame)?.is_truthy() {
                return Ok(None);
            }
        }
        self.eval(&arm.body, frame).map(Some)
    }
}

/// Test `value` against `pattern`, binding names as it goes.
fn matches_pattern(pattern: &ArmPattern, value: &Value, frame: &mut Frame) -> bool {
    match pattern {
        ArmPattern::Wildcard => true,
        ArmPattern::Literal(literal) => Value::from_literal(literal) == *value,
        ArmPattern::Bind(target) => {
            frame.define(target, value.clone());
            true
        }
        ArmPattern::List { items, rest } => {
            let Value::List(list) = value else {
                return false;
            };
            let elements = list.borrow().clone();
            let fits = match rest {
                Some(_) => elements.len() >= items.len(),
                None => elements.len() == items.len(),
            };
            if !fits {
                return false;
            }
            if !items
                .iter()
                .zip(&elements)
                .all(|(item, element)| matches_pattern(item, element, frame))
            {
                return false;
            }
            if let Some(rest) = rest {
                frame.define(rest, Value::list(elements[items.len()..].to_vec()));
            }
            true
        }
    }
}
