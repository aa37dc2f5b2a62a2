//! Workspace tooling package.
//!
//! Holds no code of its own. It exists so `rusty-hook` can install the
//! workspace pre-commit hook; the simulator lives in `crates/`.
