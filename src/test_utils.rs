pub const BLOCKSWORLD_DOMAIN_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/blocksworld/domain.pddl"
));

pub const BLOCKSWORLD_PROBLEM13_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/blocksworld/p13.pddl"
));

pub const COUNTERS_DOMAIN_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/counters/domain.pddl"
));

pub const COUNTERS_PROBLEM_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/counters/p01.pddl"
));

pub const DELIVERY_DOMAIN_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/delivery/domain.pddl"
));

pub const DELIVERY_PROBLEM_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/delivery/p01.pddl"
));
