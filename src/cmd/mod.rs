/*!
Command dispatcher.

Layout:
  src/cmd/
    mod.rs       (this file)
    mode.rs      (Mode enum for `-f`)
    dispatch.rs  (Invocation + dispatch)
    create.rs    (c)
    lookup.rs    (n, l)
    tag.rs       (t, d)

Conventions:
  - Each handler takes `&dyn DropletApi` and `&mut dyn Write` and returns
    `Result<_, DropletError>`; nothing here exits the process.
  - Results go to `out` only; diagnostics go through `tracing`.
*/

pub mod create;
pub mod dispatch;
pub mod lookup;
pub mod mode;
pub mod tag;

#[cfg(test)]
mod fake;

pub use dispatch::{Invocation, dispatch};
pub use mode::Mode;

/// Tag put on every created droplet, prefix of every generated name, and
/// the only tag namespace deletes may touch. Not configurable.
pub const TEMP_TAG: &str = "temp";
