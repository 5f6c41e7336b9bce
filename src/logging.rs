/// Stderr logger honouring `RUST_LOG`, `info` when unset. Safe to call twice.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .try_init();
}
