// Aggregation operator test cases covering:
// - All aggregation operators
// - by/without label modifiers before or after the arguments
// - Parameter variations
// - Parse and type errors

/// All aggregation operators
pub const AGGREGATION_OPERATORS: &[&str] = &[
    "sum",
    "avg",
    "count",
    "min",
    "max",
    "group",
    "stddev",
    "stdvar",
    "topk",
    "bottomk",
    "quantile",
    "count_values",
    "limitk",
    "limit_ratio",
];

/// Valid aggregation test cases without grouping
pub const VALID_AGGREGATIONS_SIMPLE: &[&str] = &[
    "sum(some_metric)",
    "avg(some_metric)",
    "count(some_metric)",
    "min(some_metric)",
    "max(some_metric)",
    "group(some_metric)",
    "stddev(some_metric)",
    "stdvar(some_metric)",
    // With complex inner expressions
    "sum(rate(some_metric[5m]))",
    "avg(some_metric * 2)",
    "count(some_metric > 0)",
    "min(some_metric + other_metric)",
    "max(some_metric{job=\"foo\"})",
    r#"sum(http_requests_total{job="prometheus"})"#,
    r#"avg(rate(http_requests_total{job="prometheus"}[5m]))"#,
    // Trailing comma after the last argument
    "sum(some_metric,)",
];

/// Valid aggregation test cases with by clause
pub const VALID_AGGREGATIONS_BY: &[&str] = &[
    "sum by (job) (some_metric)",
    "sum(some_metric) by (job)",
    "avg by (instance) (some_metric)",
    "count by (job) (some_metric)",
    "min by (instance) (some_metric)",
    "max by (job, instance) (some_metric)",
    "group by (job) (some_metric)",
    "stddev by (job) (some_metric)",
    "stdvar by (job) (some_metric)",
    "sum by (job, instance) (some_metric)",
    "avg by (job, instance, method) (some_metric)",
    // Trailing comma in the label list
    "sum by (job,) (some_metric)",
    // Empty parentheses (aggregate all)
    "sum by () (some_metric)",
    // Keywords and quoted names as labels
    "sum by (on, group, offset) (some_metric)",
    r#"sum by ("job", "service.name") (some_metric)"#,
];

/// Valid aggregation test cases with without clause
pub const VALID_AGGREGATIONS_WITHOUT: &[&str] = &[
    "sum without (job) (some_metric)",
    "sum(some_metric) without (job)",
    "avg without (instance) (some_metric)",
    "count without (job) (some_metric)",
    "min without (instance) (some_metric)",
    "max without (job, instance) (some_metric)",
    "group without (job) (some_metric)",
    "stddev without (job) (some_metric)",
    "stdvar without (job) (some_metric)",
    "sum without (job, instance) (some_metric)",
    "avg without (job, instance, method) (some_metric)",
    "sum without () (some_metric)",
];

/// Valid parametric aggregation test cases (topk, bottomk, quantile, etc.)
pub const VALID_PARAMETRIC_AGGREGATIONS: &[&str] = &[
    "topk(5, some_metric)",
    "topk(5, some_metric) by (job)",
    "topk by (job) (5, some_metric)",
    "topk(3, rate(http_requests_total[5m]))",
    "topk(scalar(foo), some_metric)",
    "bottomk(5, some_metric)",
    "bottomk(5, some_metric) by (job)",
    "bottomk by (job) (5, some_metric)",
    "quantile(0.9, some_metric)",
    "quantile(0.5, some_metric) by (job)",
    "quantile by (job) (0.9, some_metric)",
    "quantile(0.99, rate(http_requests_total[5m]))",
    r#"count_values("value", some_metric)"#,
    r#"count_values("value", some_metric) by (job)"#,
    r#"count_values by (job) ("value", some_metric)"#,
];

/// Aggregations rejected unless experimental functions are enabled
pub const EXPERIMENTAL_AGGREGATIONS: &[&str] = &[
    "limitk(5, some_metric)",
    "limitk(5, some_metric) by (job)",
    "limit_ratio(0.5, some_metric)",
    "limit_ratio(0.5, some_metric) by (job)",
];

/// Nested aggregation test cases
pub const VALID_NESTED_AGGREGATIONS: &[&str] = &[
    "sum(sum(some_metric))",
    "max(min(some_metric) by (job))",
    "avg(sum(rate(http_requests_total[5m])) by (job))",
    "topk(5, sum(rate(http_requests_total[5m])) by (job))",
    "quantile(0.9, sum(rate(http_requests_total[5m])) by (job))",
];

/// Aggregation with binary operators
pub const AGGREGATIONS_WITH_BINARY_OPS: &[&str] = &[
    "sum(some_metric) + sum(other_metric)",
    "sum(some_metric) / count(some_metric)",
    "sum(rate(http_requests_total[5m])) by (job) > 100",
    "sum(some_metric) by (job) / on(job) group_left sum(other_metric) by (job)",
    "topk(5, some_metric) + 1",
];

/// Aggregations rejected by the parser
/// Format: (input, expected error fragment)
pub const INVALID_AGGREGATIONS: &[(&str, &str)] = &[
    // Missing parentheses
    ("sum some_metric", "unexpected identifier \"some_metric\" in aggregation"),
    ("sum", "unexpected end of input in aggregation"),
    // Missing inner expression
    ("sum()", "no arguments for aggregate expression provided"),
    ("sum by (job) ()", "no arguments for aggregate expression provided"),
    // Wrong number of arguments
    ("topk(5)", "wrong number of arguments for aggregate expression provided, expected 2, got 1"),
    ("sum(a, b)", "wrong number of arguments for aggregate expression provided, expected 1, got 2"),
    ("topk(1, a, b)", "expected 2, got 3"),
    // Invalid grouping syntax
    ("sum by job (some_metric)", "unexpected identifier \"job\""),
    ("sum without job (some_metric)", "unexpected identifier \"job\""),
    // Two grouping clauses
    ("sum by (job) without (instance) (some_metric)", "unexpected \"without\" in aggregation"),
    ("sum by (job) (some_metric) by (job)", "aggregation may only have one grouping clause"),
    // Missing comma in label list
    ("sum by (job instance) (some_metric)", "unexpected identifier \"instance\""),
    // Label names may not contain colons
    ("sum by (a:b) (some_metric)", "invalid label name \"a:b\""),
    // Aggregation keywords are case-sensitive
    ("SUM(some_metric)", "unknown function with name \"SUM\""),
    // Experimental aggregations
    ("limitk(5, some_metric)", "aggregation \"limitk\" is experimental and not enabled"),
    ("limit_ratio(0.5, some_metric)", "aggregation \"limit_ratio\" is experimental and not enabled"),
];

/// Aggregations that parse but fail the type check
/// Format: (input, expected error fragment)
pub const AGGREGATION_TYPE_ERRORS: &[(&str, &str)] = &[
    // The aggregated expression is checked before the parameter
    ("topk(some_metric, 5)", "expected type instant vector in aggregation expression, got scalar"),
    ("quantile(some_metric, 0.9)", "expected type instant vector in aggregation expression"),
    ("topk(some_metric, other_metric)", "expected type scalar in aggregation parameter of \"topk\", got instant vector"),
    ("count_values(5, some_metric)", "expected type string in aggregation parameter of \"count_values\", got scalar"),
    ("sum(1)", "expected type instant vector in aggregation expression, got scalar"),
    ("sum(some_metric[5m])", "expected type instant vector in aggregation expression, got range vector"),
    (r#"avg("foo")"#, "expected type instant vector in aggregation expression, got string"),
    ("sum by (job, job) (some_metric)", "duplicate label \"job\" in grouping clause"),
];

/// Aggregation expressions from real-world queries
pub const REAL_WORLD_AGGREGATIONS: &[&str] = &[
    r#"sum(rate(http_requests_total[5m])) by (service)"#,
    r#"sum(rate(http_requests_total{status=~"5.."}[5m])) by (service) / sum(rate(http_requests_total[5m])) by (service) * 100"#,
    r#"topk(10, container_memory_usage_bytes) by (pod)"#,
    r#"histogram_quantile(0.99, sum(rate(http_request_duration_seconds_bucket[5m])) by (le, service))"#,
    r#"count(count by (instance) (up))"#,
    r#"sum by (job, instance) (rate(node_cpu_seconds_total{mode!="idle"}[5m]))"#,
];
