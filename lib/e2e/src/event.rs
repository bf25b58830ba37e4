use alloy::{rpc::types::TransactionReceipt, sol_types::SolEvent};

/// Extension trait for asserting an event gets emitted.
pub trait Ext<E> {
    /// Checks the transaction emitted the `expected` event.
    fn emits(&self, expected: E) -> bool;
}

impl<E> Ext<E> for TransactionReceipt
where
    E: SolEvent,
    E: PartialEq,
{
    fn emits(&self, expected: E) -> bool {
        // Extract all events that are the expected type.
        self.inner
            .logs()
            .iter()
            .filter_map(|log| log.log_decode::<E>().ok())
            .map(|log| log.inner.data)
            .any(|event| expected == event)
    }
}
