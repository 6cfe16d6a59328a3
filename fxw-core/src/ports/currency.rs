/// Lookup of known currency codes.
///
/// The validator only needs to know whether a code exists; it never needs
/// any other currency metadata. Implementations are expected to be static,
/// read-only tables.
pub trait CurrencyRegistry {
    /// Whether `code` names a known currency. Codes are case-sensitive.
    fn is_known(&self, code: &str) -> bool;
}

impl<T: CurrencyRegistry + ?Sized> CurrencyRegistry for &T {
    fn is_known(&self, code: &str) -> bool {
        (**self).is_known(code)
    }
}
