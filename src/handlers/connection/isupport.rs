//! 005 RPL_ISUPPORT handler.

use super::super::{Context, Handler, HandlerResult};
use slirc_proto::{Isupport, Line};
use tracing::debug;

/// Records the server's `PREFIX` and `CHANMODES` so MODE lines are walked
/// with the right argument rules.
pub struct IsupportHandler;

impl Handler for IsupportHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // 005 <me> <token>... :are supported by this server
        let isupport = Isupport::from_params(&line.params);
        let spec = ctx.session.mode_spec_mut();
        if spec.apply_isupport(&isupport) {
            debug!(
                prefix = %spec.prefix_modes(),
                symbols = %spec.prefix_symbols(),
                "Server mode rules updated"
            );
        }
        Ok(())
    }
}
