use afl::fuzz;
use promql_ast::{check, parse};

fn main() {
    fuzz!(|data: &[u8]| {
        if let Ok(s) = std::str::from_utf8(data)
            && let Ok(expr) = parse(s)
        {
            let _ = check(&expr);
        }
    });
}
