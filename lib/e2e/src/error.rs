/// Extension trait for checking that a call reverted.
pub trait RevertExt {
    /// Checks that `Self` is a call that the node reported as reverted.
    fn reverts(&self) -> bool;
}

impl RevertExt for alloy::contract::Error {
    fn reverts(&self) -> bool {
        let Self::TransportError(e) = self else {
            return false;
        };

        //  ErrorResp(
        //      ErrorPayload {
        //          code: 3,
        //          message: "execution reverted",
        //          data: Some(..),
        //      },
        //  )
        e.as_error_resp()
            .is_some_and(|payload| payload.message.contains("revert"))
    }
}

impl RevertExt for eyre::Report {
    fn reverts(&self) -> bool {
        self.downcast_ref::<alloy::contract::Error>()
            .is_some_and(RevertExt::reverts)
            || format!("{self:#}").contains("revert")
    }
}
