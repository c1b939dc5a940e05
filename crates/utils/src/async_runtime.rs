//! Driving async clients from the synchronous resolution path

use op2aws_core::{Error, Result};
use std::future::Future;
use tokio::runtime::{Builder, Handle};

/// Run `future` to completion on a current-thread runtime built for this
/// call and dropped afterwards.
///
/// Fails instead of panicking when called from inside a Tokio runtime.
pub fn run_async<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if Handle::try_current().is_ok() {
        return Err(Error::configuration(
            "run_async called from within an async runtime",
        ));
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::configuration(format!("failed to create tokio runtime: {e}")))?;

    runtime.block_on(future)
}
