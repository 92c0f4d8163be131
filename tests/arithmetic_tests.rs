use companion::kernel::arithmetic::{evaluate, is_safe_expression, EvalError, MAX_DEPTH};
use companion::kernel::dispatch::{calculate, CALCULATION_CLARIFICATION};
use companion::kernel::intent::classify;

#[test]
fn test_basic_evaluation() {
    assert_eq!(evaluate("2+2"), Ok(4.0));
    assert_eq!(evaluate("7/2"), Ok(3.5));
    assert_eq!(evaluate("((1+2)*(3+4))/7"), Ok(3.0));
}

#[test]
fn test_division_by_zero_is_error() {
    assert_eq!(evaluate("10/0"), Err(EvalError::DivisionByZero));
    assert_eq!(evaluate("10/(5-5)"), Err(EvalError::DivisionByZero));
    assert_eq!(calculate("10/0"), CALCULATION_CLARIFICATION);
}

#[test]
fn test_trailing_operator_is_error() {
    assert!(evaluate("2+").is_err());
    assert!(evaluate("*3").is_err());
    assert!(evaluate("()").is_err());
    assert_eq!(calculate("2+"), CALCULATION_CLARIFICATION);
}

#[test]
fn test_safety_boundary() {
    assert!(is_safe_expression("1+2*(3-4)/5.5"));
    assert!(!is_safe_expression(""));
    assert!(!is_safe_expression("1+x"));
    assert!(!is_safe_expression("alert(1)"));
    assert!(!is_safe_expression("2 + 2"));
    assert_eq!(evaluate("process.exit()"), Err(EvalError::UnsafeCharacter('p')));
    assert_eq!(calculate(""), CALCULATION_CLARIFICATION);
}

#[test]
fn test_spoken_calculation_end_to_end() {
    let slot = classify("calculate 25 plus 17").slot;
    assert_eq!(slot, "25+17");
    assert_eq!(evaluate(&slot), Ok(42.0));
    assert_eq!(calculate(&slot), "The result is 42");
    assert_eq!(calculate("1/4"), "The result is 0.25");
}

#[test]
fn test_overflow_is_not_surfaced() {
    let huge = format!("{}*{}", "9".repeat(200), "9".repeat(200));
    assert_eq!(evaluate(&huge), Err(EvalError::NonFinite));
}

#[test]
fn test_deep_nesting_is_rejected_not_fatal() {
    let nested = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));

    assert_eq!(evaluate(&nested(MAX_DEPTH)), Ok(1.0));
    assert_eq!(evaluate(&nested(MAX_DEPTH + 1)), Err(EvalError::TooDeep));

    // A 20 KB transcript of brackets must not exhaust the stack.
    let handle = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || calculate(&nested(10_000)))
        .unwrap();
    assert_eq!(handle.join().unwrap(), CALCULATION_CLARIFICATION);
}

#[test]
fn test_large_results_use_exponent_notation() {
    assert_eq!(calculate("1000000000000*1000000000"), "The result is 1e+21");
    assert_eq!(calculate("1/10000000"), "The result is 1e-7");
}
