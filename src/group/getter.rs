//! Getter Module
//!
//! The loader a cache group falls back to on a miss.

/// Loads the bytes for a key from the source of truth.
///
/// Called outside every cache lock and possibly from several threads at
/// once for the same key. Errors are handed back to the caller of
/// [`Group::get`](crate::group::Group::get) unchanged and never cached.
pub trait Getter: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

/// Any plain function or closure with the right shape is a getter.
impl<F> Getter for F
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn get(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        self(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Getter for Echo {
        fn get(&self, key: &str) -> anyhow::Result<Vec<u8>> {
            Ok(key.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_closure_getter() {
        let getter = |key: &str| -> anyhow::Result<Vec<u8>> { Ok(key.as_bytes().to_vec()) };
        assert_eq!(Getter::get(&getter, "key").unwrap(), b"key");
    }

    #[test]
    fn test_struct_getter_as_trait_object() {
        let getter: Box<dyn Getter> = Box::new(Echo);
        assert_eq!(getter.get("Tom").unwrap(), b"Tom");
    }
}
