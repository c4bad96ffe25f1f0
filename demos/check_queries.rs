use promql_ast::check_query;

fn main() {
    let inputs = [
        "cpu_temperature{host=\"server1\"}",
        "{__name__=\"abc\", host=\"localhost\"} offset 5m",
        "some_metric[5m:1m] @ 1609459200 offset 10m",
        "some_metric[5m:1m] offset 10m @ 1609459200",
        "sum by (job) (rate(http_requests_total[5m])) > 0.5",
        "rate(some_metric)",
        "1 > 2",
    ];

    for input in inputs {
        println!("\nChecking: {}", input);
        match check_query(input) {
            Ok((ast, ty)) => {
                println!("  OK! Type: {}", ty);
                println!("  Canonical: {}", ast);
                println!("  Parsed: {:?}", ast);
            }
            Err(e) => println!("  Error: {}", e),
        }
    }
}
