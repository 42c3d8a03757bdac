use ulid::Ulid;

/// Source of fresh entity identifiers.
///
/// Operations that create windows or limits take one of these instead of
/// reading a clock themselves, so id generation stays deterministic in
/// tests and unique under rapid successive creations.
pub trait IdSource {
    fn next_id(&mut self) -> Ulid;
}

/// Production source: ULIDs, unique even within one millisecond.
#[derive(Debug, Default, Clone, Copy)]
pub struct UlidGen;

impl IdSource for UlidGen {
    fn next_id(&mut self) -> Ulid {
        Ulid::new()
    }
}
