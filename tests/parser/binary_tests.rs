// Binary operator test cases covering:
// - Arithmetic operators (+, -, *, /, %, ^, atan2)
// - Comparison operators (==, !=, <, <=, >, >=)
// - Set operators (and, or, unless)
// - Operator precedence and associativity
// - Vector matching (on, ignoring, group_left, group_right)
// - Bool modifier for comparisons

/// Arithmetic operator test cases
/// Format: (input, operator)
pub const ARITHMETIC_OPERATORS: &[(&str, &str)] = &[
    ("1 + 1", "+"),
    ("1 - 1", "-"),
    ("1 * 1", "*"),
    ("1 / 1", "/"),
    ("1 % 1", "%"),
    ("1 ^ 1", "^"),
    ("foo + bar", "+"),
    ("foo - bar", "-"),
    ("foo * bar", "*"),
    ("foo / bar", "/"),
    ("foo % bar", "%"),
    ("foo ^ bar", "^"),
    ("check ^ taco", "^"),
    ("foo atan2 bar", "atan2"),
    ("1 atan2 foo", "atan2"),
    ("2.5 / bar", "/"),
];

/// Comparison operator test cases
/// Format: (input, operator, has_bool)
pub const COMPARISON_OPERATORS: &[(&str, &str, bool)] = &[
    ("foo == bar", "==", false),
    ("foo != bar", "!=", false),
    ("foo > bar", ">", false),
    ("foo >= bar", ">=", false),
    ("foo < bar", "<", false),
    ("foo <= bar", "<=", false),
    // With bool modifier
    ("1 == bool 1", "==", true),
    ("1 != bool 1", "!=", true),
    ("1 > bool 1", ">", true),
    ("1 >= bool 1", ">=", true),
    ("1 < bool 1", "<", true),
    ("1 <= bool 1", "<=", true),
    ("foo == bool 1", "==", true),
    ("foo > bool on(job) bar", ">", true),
    // Scalar-vector comparisons filter without bool
    ("foo == 1", "==", false),
    ("1 < foo", "<", false),
];

/// Set operator test cases
/// Format: (input, operator)
pub const SET_OPERATORS: &[(&str, &str)] = &[
    ("foo and bar", "and"),
    ("foo or bar", "or"),
    ("foo unless bar", "unless"),
    ("foo and on(job) bar", "and"),
    ("foo or ignoring(instance) bar", "or"),
];

/// Operator precedence test cases
/// Format: (input, equivalent fully parenthesized input)
pub const PRECEDENCE_TESTS: &[(&str, &str)] = &[
    // Precedence (lowest to highest): or < and/unless < comparison < +/- < * / % atan2 < ^
    ("1 + 2 * 3", "1 + (2 * 3)"),
    ("1 < bool 2 - 1 * 2", "1 < bool (2 - (1 * 2))"),
    ("1 + 2/(3*1)", "1 + (2 / (3 * 1))"),
    ("foo + bar or bla and blub", "(foo + bar) or (bla and blub)"),
    ("foo and bar unless baz or qux", "((foo and bar) unless baz) or qux"),
    ("a or b and c == d + e * f ^ g", "a or (b and (c == (d + (e * (f ^ g)))))"),
    ("a atan2 b * c", "(a atan2 b) * c"),
    ("a + b atan2 c", "a + (b atan2 c)"),
    // Left associativity
    ("1 - 2 - 3", "(1 - 2) - 3"),
    ("a / b * c", "(a / b) * c"),
    ("a unless b and c", "(a unless b) and c"),
    // Vector matching binds to its own operator
    (
        "bar + on(foo) bla / on(baz, buz) group_right(test) blub",
        "bar + on(foo) (bla / on(baz, buz) group_right(test) blub)",
    ),
];

/// Right-associativity of the power operator and its interplay with unary signs
/// Format: (input, equivalent fully parenthesized input)
pub const POWER_PRECEDENCE_TESTS: &[(&str, &str)] = &[
    ("2 ^ 3 ^ 2", "2 ^ (3 ^ 2)"),
    ("-1^2", "-(1 ^ 2)"),
    ("-1^-2", "-(1 ^ (-2))"),
    ("2 ^ -1 ^ 2", "2 ^ (-(1 ^ 2))"),
];

/// Unary operator precedence tests
/// Format: (input, equivalent fully parenthesized input)
pub const UNARY_PRECEDENCE_TESTS: &[(&str, &str)] = &[
    ("-1*2", "(-1) * 2"),
    ("-1+2", "(-1) + 2"),
    ("-a % b", "(-a) % b"),
    ("+1 + -2 * 1", "(+1) + ((-2) * 1)"),
    ("1 - -1", "1 - (-1)"),
];

/// Vector matching test cases
pub const VECTOR_MATCHING_TESTS: &[&str] = &[
    // on() matching
    "foo * on(test,blub) bar",
    "foo and on(test,blub) bar",
    "foo and on() bar",
    "foo unless on(bar) baz",
    // ignoring() matching
    "foo and ignoring(test,blub) bar",
    "foo and ignoring() bar",
    // group_left
    "foo * on(test,blub) group_left bar",
    "foo / on(test,blub) group_left(bar) bar",
    "foo / ignoring(test,blub) group_left(blub) bar",
    "foo / ignoring(test,blub) group_left(bar) bar",
    // group_right
    "foo - on(test,blub) group_right(bar,foo) bar",
    "foo - ignoring(test,blub) group_right(bar,foo) bar",
    // bool before matching
    "foo == bool on(job) group_left(instance) bar",
    // Trailing comma and keyword labels
    "foo + on(job,) bar",
    "foo + on(on, by) bar",
];

/// Binary expressions rejected by the parser
/// Format: (input, expected error fragment)
pub const INVALID_BINARY_OPS: &[(&str, &str)] = &[
    // Matcher operators are not binary operators
    ("1 !~ 1", "unexpected \"!~\" in expression"),
    ("1 =~ 1", "unexpected \"=~\" in expression"),
    ("foo = bar", "unexpected \"=\" in expression"),
    // Missing operand
    ("1+", "unexpected end of input in expression"),
    ("1 /", "unexpected end of input in expression"),
    ("foo and", "unexpected end of input in expression"),
    // Invalid operator position
    ("*1", "unexpected \"*\" in expression"),
    ("*test", "unexpected \"*\" in expression"),
    // Grouping without on/ignoring
    ("foo + group_left(baz) bar", "unexpected \"group_left\" in expression"),
    // Bool after the matching clause
    ("foo == on(job) bool bar", "unexpected \"bool\" in expression"),
    // Double matching clause
    ("a - on(b) ignoring(c) d", "unexpected \"ignoring\" in expression"),
    // Matching clause needs a label list
    ("foo + on bar", "unexpected identifier \"bar\" in vector matching"),
    ("foo + on(job bar", "unexpected identifier \"bar\" in vector matching"),
    // Keyword operators are case-sensitive
    ("this AND that", "unexpected identifier \"AND\""),
    // Range vectors cannot be operands
    ("foo[5m] + 1", "binary operator \"+\" cannot take a range vector operand (matrix selector)"),
    ("1 + foo[5m:1m]", "binary operator \"+\" cannot take a range vector operand (subquery)"),
    ("rate(foo[5m] + bar[5m])", "cannot take a range vector operand"),
    ("(foo[5m]) * 2", "cannot take a range vector operand"),
];

/// Binary expressions that parse but fail the type check
/// Format: (input, expected error fragment)
pub const BINARY_TYPE_ERRORS: &[(&str, &str)] = &[
    // Set operators on scalars
    ("1 and 1", "set operator \"and\" not allowed in binary scalar expression"),
    ("1 or 1", "set operator \"or\" not allowed in binary scalar expression"),
    ("1 unless 1", "set operator \"unless\" not allowed in binary scalar expression"),
    ("foo and 1", "set operator \"and\" not allowed in binary scalar expression"),
    ("1 and foo", "set operator \"and\" not allowed in binary scalar expression"),
    ("foo or 1", "set operator \"or\" not allowed in binary scalar expression"),
    ("foo unless 1", "set operator \"unless\" not allowed in binary scalar expression"),
    // Comparison without bool on scalars
    ("1 == 1", "comparisons between scalars must use bool modifier"),
    ("1 > 2", "comparisons between scalars must use bool modifier"),
    // Bool on non-comparison
    ("foo + bool bar", "bool modifier can only be used on comparison operators"),
    ("foo + bool 10", "bool modifier can only be used on comparison operators"),
    ("foo and bool 10", "bool modifier can only be used on comparison operators"),
    // Vector matching with a scalar side
    ("1 + on(bar) foo", "vector matching only allowed between instant vectors"),
    ("foo == on(bar) 10", "vector matching only allowed between instant vectors"),
    // Grouping on set operators
    ("foo and on(bar) group_left(baz) bar", "no grouping allowed for \"and\" operation"),
    ("foo and on(bar) group_right(baz) bar", "no grouping allowed for \"and\" operation"),
    ("foo or on(bar) group_left(baz) bar", "no grouping allowed for \"or\" operation"),
    ("foo unless on(bar) group_right(baz) bar", "no grouping allowed for \"unless\" operation"),
    // Label in both on() and group_*()
    (
        r#"http_requests{group="production"} + on(instance) group_left(job,instance) cpu_count{type="smp"}"#,
        "label \"instance\" must not occur in ON and GROUP clause at once",
    ),
    // String operands
    (r#"foo + "bar""#, "binary expression must contain only scalar and instant vector types, got instant vector + string"),
    (r#""a" == bool "b""#, "got string == string"),
];

/// Parenthesized expression test cases
pub const PARENTHESIZED_TESTS: &[&str] = &[
    "(foo)",
    "((foo))",
    "(foo + bar)",
    "(1 + 2) * 3",
    "(f) > bar",
    "(some)+(more)",
];

/// Invalid parentheses test cases
/// Format: (input, expected error fragment)
pub const INVALID_PARENTHESES: &[(&str, &str)] = &[
    ("(1))", "unexpected \")\" in expression"),
    ("((1)", "unexpected end of input in parenthesized expression"),
    ("(", "unexpected end of input in expression"),
    ("()", "unexpected \")\" in expression"),
];
