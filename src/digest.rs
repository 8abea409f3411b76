//! Key digests.
//!
//! Every table operation starts by reducing a key to a `u64` digest. Keys opt
//! in through [`Hashable`], and a map picks the function it uses through its
//! [`HashProvider`] type parameter. The built-in [`DefaultHashProvider`]
//! forwards to [`Hashable`]; [`BuildHasherProvider`] adapts any
//! [`BuildHasher`] for keys that only implement [`Hash`].
//!
//! The built-in digests are deliberately simple. Integral keys map to
//! themselves and strings use a short rolling hash, so adversarial key sets
//! can force long probe sequences. Use a [`BuildHasherProvider`] (or
//! `FoldHashProvider` with the `foldhash` feature) when that matters.

use alloc::boxed::Box;
use alloc::string::String;
use core::hash::BuildHasher;
use core::hash::Hash;

/// A key that can produce its own digest.
///
/// Implementations must be deterministic and agree with `Eq`: equal keys
/// produce equal digests. A borrowed form used for lookups (for example `str`
/// for `String`) must produce the same digest as the owned key.
pub trait Hashable {
    /// Returns the digest of `self`.
    fn digest(&self) -> u64;
}

/// Selects the digest function a map uses for keys of type `K`.
///
/// # Examples
///
/// ```rust
/// use quad_hash::HashMap;
/// use quad_hash::digest::HashProvider;
///
/// // Only the low byte matters for these keys.
/// #[derive(Clone, Copy, Default)]
/// struct LowByte;
///
/// impl HashProvider<u32> for LowByte {
///     fn digest(&self, key: &u32) -> u64 {
///         u64::from(*key & 0xFF)
///     }
/// }
///
/// let mut map = HashMap::with_provider(LowByte);
/// map.put(0x100u32, "a");
/// map.put(0x200u32, "b");
/// assert_eq!(map.get(&0x100), Some(&"a"));
/// assert_eq!(map.get(&0x200), Some(&"b"));
/// ```
pub trait HashProvider<K: ?Sized> {
    /// Returns the digest of `key`.
    fn digest(&self, key: &K) -> u64;
}

/// The provider used when none is given: forwards to [`Hashable`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultHashProvider;

impl<K> HashProvider<K> for DefaultHashProvider
where
    K: ?Sized + Hashable,
{
    #[inline]
    fn digest(&self, key: &K) -> u64 {
        key.digest()
    }
}

/// Adapts a [`BuildHasher`] into a [`HashProvider`] for any `K: Hash`.
///
/// # Examples
///
/// ```rust
/// use std::collections::hash_map::RandomState;
///
/// use quad_hash::HashMap;
/// use quad_hash::digest::BuildHasherProvider;
///
/// let mut map = HashMap::with_provider(BuildHasherProvider::new(RandomState::new()));
/// map.put((1, 2), "pair");
/// assert_eq!(map.get(&(1, 2)), Some(&"pair"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildHasherProvider<S> {
    hash_builder: S,
}

impl<S> BuildHasherProvider<S> {
    /// Wraps `hash_builder`.
    pub fn new(hash_builder: S) -> Self {
        Self { hash_builder }
    }

    /// Returns the wrapped hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<K, S> HashProvider<K> for BuildHasherProvider<S>
where
    K: ?Sized + Hash,
    S: BuildHasher,
{
    #[inline]
    fn digest(&self, key: &K) -> u64 {
        self.hash_builder.hash_one(key)
    }
}

/// A [`BuildHasherProvider`] over foldhash's randomly seeded fast hasher.
#[cfg(feature = "foldhash")]
pub type FoldHashProvider = BuildHasherProvider<foldhash::fast::RandomState>;

/// Rolling string digest.
///
/// The state is seeded with the byte length. For every byte it is rotated
/// left by 27 bits (a right rotation by 5 over 32 bits) and then folded in as
/// `33 * h + byte`, so the result depends on both the bytes and their order.
///
/// ```rust
/// use quad_hash::digest::string_digest;
///
/// assert_eq!(string_digest(b""), 0);
/// // The state is 32 bits wide: 33 * 2^27 wraps.
/// assert_eq!(string_digest(b"a"), 134_217_825);
/// assert_ne!(string_digest(b"ab"), string_digest(b"ba"));
/// ```
pub fn string_digest(bytes: &[u8]) -> u64 {
    let seed = bytes.len() as u32;
    let h = bytes.iter().fold(seed, |h, &byte| {
        h.rotate_left(27)
            .wrapping_mul(33)
            .wrapping_add(u32::from(byte))
    });
    u64::from(h)
}

impl Hashable for str {
    #[inline]
    fn digest(&self) -> u64 {
        string_digest(self.as_bytes())
    }
}

impl Hashable for String {
    #[inline]
    fn digest(&self) -> u64 {
        self.as_str().digest()
    }
}

impl Hashable for Box<str> {
    #[inline]
    fn digest(&self) -> u64 {
        (**self).digest()
    }
}

impl<T> Hashable for &T
where
    T: ?Sized + Hashable,
{
    #[inline]
    fn digest(&self) -> u64 {
        (**self).digest()
    }
}

macro_rules! identity_digest {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Hashable for $ty {
                #[inline]
                fn digest(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

// Signed values sign-extend, 128-bit values truncate.
identity_digest!(u8, u16, u32, u64, usize, u128, i8, i16, i32, i64, isize, i128);

impl Hashable for char {
    #[inline]
    fn digest(&self) -> u64 {
        u64::from(u32::from(*self))
    }
}

impl Hashable for bool {
    #[inline]
    fn digest(&self) -> u64 {
        u64::from(*self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::hash::Hasher;

    use siphasher::sip::SipHasher;

    use super::*;

    #[test]
    fn integers_are_identity() {
        assert_eq!(0u8.digest(), 0);
        assert_eq!(200u8.digest(), 200);
        assert_eq!(65_535u16.digest(), 65_535);
        assert_eq!(7u32.digest(), 7);
        assert_eq!(u64::MAX.digest(), u64::MAX);
        assert_eq!(42usize.digest(), 42);
        assert_eq!(42i32.digest(), 42);
        assert_eq!(((1u128 << 64) + 5).digest(), 5);
    }

    #[test]
    fn signed_integers_sign_extend() {
        assert_eq!((-1i8).digest(), u64::MAX);
        assert_eq!((-1i32).digest(), u64::MAX);
        assert_eq!((-2i64).digest(), u64::MAX - 1);
        assert_eq!(i16::MIN.digest(), i16::MIN as i64 as u64);
    }

    #[test]
    fn chars_and_bools() {
        assert_eq!('a'.digest(), 97);
        assert_eq!('\u{1F600}'.digest(), 0x1F600);
        assert_eq!(true.digest(), 1);
        assert_eq!(false.digest(), 0);
    }

    #[test]
    fn string_digest_matches_manual_rolling_hash() {
        let mut h: u32 = 3;
        for b in b"abc" {
            h = (h << 27) | (h >> 5);
            h = h.wrapping_mul(33).wrapping_add(u32::from(*b));
        }
        assert_eq!(string_digest(b"abc"), u64::from(h));
        assert_eq!("abc".digest(), u64::from(h));
    }

    #[test]
    fn string_digest_wraps_at_32_bits() {
        // Seed 1 rotated left by 27 is 2^27; 33 * 2^27 overflows u32.
        let expected = 33u32.wrapping_mul(1 << 27).wrapping_add(97);
        assert_eq!(string_digest(b"a"), u64::from(expected));
        assert_eq!(string_digest(b"a"), 134_217_825);
        assert!(string_digest(b"a longer string with many bytes") <= u64::from(u32::MAX));
    }

    #[test]
    fn string_digest_depends_on_order_and_length() {
        assert_ne!("abc".digest(), "cba".digest());
        assert_ne!("a".digest(), "aa".digest());
        assert_ne!("".digest(), "\0".digest());
    }

    #[test]
    fn owned_and_borrowed_strings_agree() {
        let owned = "hello world".to_string();
        let boxed: Box<str> = "hello world".into();
        assert_eq!(owned.digest(), "hello world".digest());
        assert_eq!(boxed.digest(), "hello world".digest());
        assert_eq!((&owned).digest(), owned.digest());
    }

    #[test]
    fn default_provider_forwards_to_hashable() {
        let provider = DefaultHashProvider;
        assert_eq!(HashProvider::<u32>::digest(&provider, &9), 9);
        assert_eq!(provider.digest("xyz"), "xyz".digest());
    }

    #[derive(Clone, Default)]
    struct SipBuilder;

    impl BuildHasher for SipBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(1, 2)
        }
    }

    #[test]
    fn build_hasher_provider_uses_builder() {
        let provider = BuildHasherProvider::new(SipBuilder);

        let mut expected = SipHasher::new_with_keys(1, 2);
        17u64.hash(&mut expected);
        assert_eq!(provider.digest(&17u64), expected.finish());

        let mut expected = SipHasher::new_with_keys(1, 2);
        "key".hash(&mut expected);
        assert_eq!(provider.digest("key"), expected.finish());
    }

    #[cfg(feature = "foldhash")]
    #[test]
    fn foldhash_provider_is_deterministic_per_instance() {
        let provider = FoldHashProvider::default();
        assert_eq!(provider.digest(&1234u64), provider.digest(&1234u64));
        assert_eq!(provider.digest("same"), provider.digest("same"));
    }
}
