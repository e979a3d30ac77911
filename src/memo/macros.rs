//! Decorator Macro
//!
//! `value_cache!` wraps a method body with a [`ValueCache`](crate::ValueCache).

/// Memoizes a `&self` method into a slot on its owner.
///
/// The owner must implement [`HasSlots`](crate::HasSlots). Without a slot
/// name the value is kept in `_val_<method name>`; `slot = "...";` picks the
/// name explicitly. Extra arguments reach the body on the first call only;
/// they play no part in caching.
///
/// ```
/// use value_cache::{value_cache, HasSlots, Slots};
///
/// struct Foo { a: i64, b: i64, slots: Slots }
///
/// impl HasSlots for Foo {
///     fn slots(&self) -> &Slots { &self.slots }
/// }
///
/// impl Foo {
///     value_cache! {
///         fn multiply(&self) -> i64 { self.a * self.b }
///     }
///
///     value_cache! {
///         slot = "sum_cache";
///         fn sum(&self) -> i64 { self.a + self.b }
///     }
/// }
///
/// let foo = Foo { a: 2, b: 3, slots: Slots::new() };
/// assert_eq!(foo.multiply(), 6);
/// assert_eq!(foo.sum(), 5);
/// assert_eq!(foo.slots.names(), vec!["_val_multiply", "sum_cache"]);
/// ```
///
/// A blank slot name does not compile, whether empty:
///
/// ```compile_fail
/// use value_cache::{value_cache, HasSlots, Slots};
///
/// struct Foo { slots: Slots }
/// impl HasSlots for Foo {
///     fn slots(&self) -> &Slots { &self.slots }
/// }
/// impl Foo {
///     value_cache! {
///         slot = "";
///         fn one(&self) -> i64 { 1 }
///     }
/// }
/// ```
///
/// or whitespace only:
///
/// ```compile_fail
/// use value_cache::{value_cache, HasSlots, Slots};
///
/// struct Foo { slots: Slots }
/// impl HasSlots for Foo {
///     fn slots(&self) -> &Slots { &self.slots }
/// }
/// impl Foo {
///     value_cache! {
///         slot = " \t";
///         fn one(&self) -> i64 { 1 }
///     }
/// }
/// ```
#[macro_export]
macro_rules! value_cache {
    (
        slot = $slot:literal;
        $(#[$meta:meta])*
        $vis:vis fn $name:ident(&$this:ident $(, $arg:ident : $arg_ty:ty)* $(,)?) -> $ret:ty $body:block
    ) => {
        $(#[$meta])*
        $vis fn $name(&$this $(, $arg: $arg_ty)*) -> $ret {
            const _: () = ::core::assert!(
                !$crate::memo::is_blank($slot),
                "slot name must not be blank"
            );
            static MEMO: ::std::sync::OnceLock<$crate::ValueCache> = ::std::sync::OnceLock::new();
            let memo = MEMO.get_or_init(|| $crate::ValueCache::from_checked_literal($slot));
            memo.call($this, || $body)
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident(&$this:ident $(, $arg:ident : $arg_ty:ty)* $(,)?) -> $ret:ty $body:block
    ) => {
        $(#[$meta])*
        $vis fn $name(&$this $(, $arg: $arg_ty)*) -> $ret {
            static MEMO: ::std::sync::OnceLock<$crate::ValueCache> = ::std::sync::OnceLock::new();
            let memo = MEMO.get_or_init(|| $crate::ValueCache::memoize(::core::stringify!($name)));
            memo.call($this, || $body)
        }
    };
}
