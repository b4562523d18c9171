//! C ABI over [`Greeter`] for the native front end.
//!
//! Greeters cross the boundary as opaque pointers owned by the caller; each one
//! returned by [`dtimelog_greeter_new`] must be released with
//! [`dtimelog_greeter_free`], and each string from [`dtimelog_greeter_greeting`]
//! with [`dtimelog_string_free`].

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;

use dtimelog_core::Greeter;
use tracing::warn;

/// Reads a borrowed C string, rejecting null and invalid UTF-8.
///
/// # Safety
///
/// `value` must be null or point to a valid null-terminated string.
unsafe fn borrow_str<'a>(value: *const c_char, field: &'static str) -> Option<&'a str> {
    if value.is_null() {
        warn!(stage = "ffi", field, "null string pointer");
        return None;
    }
    match CStr::from_ptr(value).to_str() {
        Ok(text) => Some(text),
        Err(err) => {
            warn!(stage = "ffi", field, error = %err, "string is not valid utf-8");
            None
        }
    }
}

/// Allocates a greeter for `greeting`. Returns null on invalid input.
///
/// # Safety
///
/// `greeting` must be null or point to a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn dtimelog_greeter_new(greeting: *const c_char) -> *mut Greeter {
    match borrow_str(greeting, "greeting") {
        Some(text) => Box::into_raw(Box::new(Greeter::new(text))),
        None => ptr::null_mut(),
    }
}

/// Prints the greeting for `name` to stdout. Returns `0` on success, `-1` otherwise.
///
/// # Safety
///
/// `greeter` must be null or a live pointer from [`dtimelog_greeter_new`];
/// `name` must be null or point to a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn dtimelog_greeter_greet(
    greeter: *const Greeter,
    name: *const c_char,
) -> c_int {
    let Some(greeter) = greeter.as_ref() else {
        warn!(stage = "ffi", "greet called with null greeter");
        return -1;
    };
    let Some(name) = borrow_str(name, "name") else {
        return -1;
    };
    match greeter.greet(name) {
        Ok(()) => 0,
        Err(err) => {
            warn!(stage = "ffi", error = %err, "failed to write greeting");
            -1
        }
    }
}

/// Returns the greeting for `name` as a newly allocated string, or null.
///
/// # Safety
///
/// Same pointer requirements as [`dtimelog_greeter_greet`]. The result must be
/// released with [`dtimelog_string_free`].
#[no_mangle]
pub unsafe extern "C" fn dtimelog_greeter_greeting(
    greeter: *const Greeter,
    name: *const c_char,
) -> *mut c_char {
    let Some(greeter) = greeter.as_ref() else {
        return ptr::null_mut();
    };
    let Some(name) = borrow_str(name, "name") else {
        return ptr::null_mut();
    };
    // Interior NULs are impossible here since both inputs came from C strings.
    match CString::new(greeter.greeting(name)) {
        Ok(message) => message.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Releases a string returned by [`dtimelog_greeter_greeting`]. Null is ignored.
///
/// # Safety
///
/// `value` must be null or a pointer previously returned by this library
/// that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn dtimelog_string_free(value: *mut c_char) {
    if !value.is_null() {
        drop(CString::from_raw(value));
    }
}

/// Releases a greeter. Null is ignored.
///
/// # Safety
///
/// `greeter` must be null or a pointer from [`dtimelog_greeter_new`] that has
/// not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn dtimelog_greeter_free(greeter: *mut Greeter) {
    if !greeter.is_null() {
        drop(Box::from_raw(greeter));
    }
}
