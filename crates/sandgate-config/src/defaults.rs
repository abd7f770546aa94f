//! Default value functions for serde deserialization.
//!
//! These functions forward to constants defined in `sandgate_core::defaults`.

use sandgate_core::defaults;

/// Generate default value functions that forward to sandgate_core::defaults constants.
macro_rules! default_fns {
    // For Copy types (integers, bool, etc.)
    ($($fn_name:ident => $const_name:ident : $ty:ty),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> $ty {
                defaults::$const_name
            }
        )*
    };
}

/// Generate default value functions that return String from &str constants.
macro_rules! default_string_fns {
    ($($fn_name:ident => $const_name:ident),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> String {
                defaults::$const_name.to_string()
            }
        )*
    };
}

default_fns! {
    default_shutdown_timeout_secs => DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64,
    default_max_connections       => DEFAULT_SQL_MAX_CONNECTIONS: u32,
    default_min_connections       => DEFAULT_SQL_MIN_CONNECTIONS: u32,
    default_connect_timeout_secs  => DEFAULT_SQL_CONNECT_TIMEOUT_SECS: u64,
    default_init_schema           => DEFAULT_STORE_INIT_SCHEMA: bool,
}

default_string_fns! {
    default_listen      => DEFAULT_LISTEN,
    default_root        => DEFAULT_ROOT,
    default_user_header => SANDSTORM_USER_HEADER,
    default_backend     => DEFAULT_STORE_BACKEND,
}
