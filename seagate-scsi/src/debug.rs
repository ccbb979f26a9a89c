// feature=defmt and os=none? use defmt
//   feature=tracing? use tracing
//     neither? use nothing

#[cfg(all(target_os = "none", feature = "defmt"))]
pub use defmt::debug as println;

#[cfg(all(
    feature = "tracing",
    not(all(target_os = "none", feature = "defmt"))
))]
pub use tracing::debug as println;

#[cfg(all(
    not(feature = "tracing"),
    not(all(target_os = "none", feature = "defmt"))
))]
macro_rules! println {
    ($fmt:expr) => {};
    ($fmt:expr, $($arg:tt)*) => {};
}

#[cfg(all(
    not(feature = "tracing"),
    not(all(target_os = "none", feature = "defmt"))
))]
pub(crate) use println;
