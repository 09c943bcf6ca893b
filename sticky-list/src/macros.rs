//! Logging shims. With the `tracing` feature every event goes to the `sticky_list` target;
//! without it the calls expand to nothing.

#[cfg(feature = "tracing")]
macro_rules! sticky_event {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "sticky_list", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! sticky_event {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! strace {
    ($($tt:tt)*) => { sticky_event!(trace, $($tt)*) };
}

macro_rules! sdebug {
    ($($tt:tt)*) => { sticky_event!(debug, $($tt)*) };
}

macro_rules! swarn {
    ($($tt:tt)*) => { sticky_event!(warn, $($tt)*) };
}
