//! C ABI surface.
//!
//! Exposes the builder to test harnesses in other languages. All
//! heap-allocated objects are opaque pointers released through the
//! matching `_free` functions; every constructor returns null on
//! failure rather than raising.
//!
//! Handle lifetime contract: a context must outlive every identity
//! handle created from it. Freeing the context first and then touching
//! an identity handle is undefined behavior, exactly as it is in the
//! underlying LLVM C API.

use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use inkwell::context::Context;
use inkwell::types::{BasicType, BasicTypeEnum};
use inkwell::values::AnyValue;
use inkwell::AddressSpace;

use crate::identity::{build_identity, IdentityFunction};

/// Pointee kinds a harness can describe without holding LLVM types.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackirPointee {
    I8 = 0,
    I16 = 1,
    I32 = 2,
    I64 = 3,
    F32 = 4,
    F64 = 5,
}

/// A pointer-type descriptor, passed by value across the ABI.
///
/// `address_space` is the space of the *described* pointer; the built
/// function always uses the tracked space regardless, the same way the
/// in-process API derives the tracked variant from whatever pointer it
/// is handed.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TrackirPointerDesc {
    pub pointee: TrackirPointee,
    pub address_space: u32,
}

/// Opaque compilation context handle.
pub struct TrackirContext(Context);

/// Opaque handle owning a built function and its hosting module.
pub struct TrackirIdentity {
    inner: IdentityFunction<'static>,
}

fn pointee_type(context: &Context, pointee: TrackirPointee) -> BasicTypeEnum<'_> {
    match pointee {
        TrackirPointee::I8 => context.i8_type().into(),
        TrackirPointee::I16 => context.i16_type().into(),
        TrackirPointee::I32 => context.i32_type().into(),
        TrackirPointee::I64 => context.i64_type().into(),
        TrackirPointee::F32 => context.f32_type().into(),
        TrackirPointee::F64 => context.f64_type().into(),
    }
}

/// Create a compilation context.
#[no_mangle]
pub extern "C" fn trackir_context_new() -> *mut TrackirContext {
    Box::into_raw(Box::new(TrackirContext(Context::create())))
}

/// Free a context created by [`trackir_context_new`].
///
/// # Safety
/// `ctx` must be a pointer returned by `trackir_context_new`, and every
/// identity handle created from it must already be freed or leaked.
#[no_mangle]
pub unsafe extern "C" fn trackir_context_free(ctx: *mut TrackirContext) {
    if !ctx.is_null() {
        drop(Box::from_raw(ctx));
    }
}

/// Build an identity function over the tracked variant of the
/// described pointee.
///
/// Returns null if `ctx` is null, the address space is out of range,
/// or the build fails.
///
/// # Safety
/// `ctx` must be a live pointer returned by `trackir_context_new`.
#[no_mangle]
pub unsafe extern "C" fn trackir_identity_new(
    ctx: *const TrackirContext,
    desc: TrackirPointerDesc,
) -> *mut TrackirIdentity {
    if ctx.is_null() {
        return ptr::null_mut();
    }
    let context = &(*ctx).0;

    let space = match AddressSpace::try_from(desc.address_space) {
        Ok(space) => space,
        Err(_) => return ptr::null_mut(),
    };
    let pointer_ty = pointee_type(context, desc.pointee).ptr_type(space);

    match build_identity(context, pointer_ty) {
        Ok(built) => {
            // Erase the borrow of the caller-owned context; validity is
            // the caller's contract (see module docs).
            let inner: IdentityFunction<'static> = std::mem::transmute(built);
            Box::into_raw(Box::new(TrackirIdentity { inner }))
        }
        Err(_) => ptr::null_mut(),
    }
}

/// Number of parameters of the built function.
///
/// # Safety
/// `id` must be null or a live pointer returned by `trackir_identity_new`.
#[no_mangle]
pub unsafe extern "C" fn trackir_identity_param_count(id: *const TrackirIdentity) -> u32 {
    if id.is_null() {
        return 0;
    }
    (*id).inner.function().count_params()
}

/// Number of basic blocks of the built function.
///
/// # Safety
/// `id` must be null or a live pointer returned by `trackir_identity_new`.
#[no_mangle]
pub unsafe extern "C" fn trackir_identity_block_count(id: *const TrackirIdentity) -> u32 {
    if id.is_null() {
        return 0;
    }
    (*id).inner.function().count_basic_blocks()
}

/// Render the built function as textual IR.
///
/// The returned string must be released with [`trackir_string_free`].
///
/// # Safety
/// `id` must be null or a live pointer returned by `trackir_identity_new`.
#[no_mangle]
pub unsafe extern "C" fn trackir_identity_print(id: *const TrackirIdentity) -> *mut c_char {
    if id.is_null() {
        return ptr::null_mut();
    }
    let ir = (*id).inner.function().print_to_string().to_string();
    match CString::new(ir) {
        Ok(s) => s.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a string returned by [`trackir_identity_print`].
///
/// # Safety
/// `s` must be null or a pointer returned by `trackir_identity_print`.
#[no_mangle]
pub unsafe extern "C" fn trackir_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Free an identity handle together with its hosting module.
///
/// # Safety
/// `id` must be null or a pointer returned by `trackir_identity_new`.
#[no_mangle]
pub unsafe extern "C" fn trackir_identity_free(id: *mut TrackirIdentity) {
    if !id.is_null() {
        drop(Box::from_raw(id));
    }
}

/// Consume an identity handle, deliberately leaking its module.
///
/// This is the conventional lifecycle in throwaway test harnesses that
/// tear the process down afterwards. The function stays valid for the
/// remainder of the process (the context must also never be freed).
///
/// # Safety
/// `id` must be null or a pointer returned by `trackir_identity_new`.
#[no_mangle]
pub unsafe extern "C" fn trackir_identity_leak(id: *mut TrackirIdentity) {
    if !id.is_null() {
        Box::from_raw(id).inner.leak();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn i32_desc() -> TrackirPointerDesc {
        TrackirPointerDesc {
            pointee: TrackirPointee::I32,
            address_space: 0,
        }
    }

    #[test]
    fn build_and_inspect_through_the_c_api() {
        unsafe {
            let ctx = trackir_context_new();
            let id = trackir_identity_new(ctx, i32_desc());
            assert!(!id.is_null());

            assert_eq!(trackir_identity_param_count(id), 1);
            assert_eq!(trackir_identity_block_count(id), 1);

            let printed = trackir_identity_print(id);
            assert!(!printed.is_null());
            let ir = std::ffi::CStr::from_ptr(printed).to_str().unwrap();
            assert!(ir.contains("identity"));
            assert!(ir.contains("addrspace(10)"));
            trackir_string_free(printed);

            trackir_identity_free(id);
            trackir_context_free(ctx);
        }
    }

    #[test]
    fn null_context_yields_null() {
        unsafe {
            let id = trackir_identity_new(ptr::null(), i32_desc());
            assert!(id.is_null());
        }
    }

    #[test]
    fn null_handles_are_tolerated_by_accessors() {
        unsafe {
            assert_eq!(trackir_identity_param_count(ptr::null()), 0);
            assert_eq!(trackir_identity_block_count(ptr::null()), 0);
            assert!(trackir_identity_print(ptr::null()).is_null());
            trackir_identity_free(ptr::null_mut());
            trackir_string_free(ptr::null_mut());
        }
    }

    #[test]
    fn each_pointee_kind_builds() {
        unsafe {
            let ctx = trackir_context_new();
            for pointee in [
                TrackirPointee::I8,
                TrackirPointee::I16,
                TrackirPointee::I32,
                TrackirPointee::I64,
                TrackirPointee::F32,
                TrackirPointee::F64,
            ] {
                let desc = TrackirPointerDesc {
                    pointee,
                    address_space: 0,
                };
                let id = trackir_identity_new(ctx, desc);
                assert!(!id.is_null(), "{pointee:?} failed to build");
                trackir_identity_free(id);
            }
            trackir_context_free(ctx);
        }
    }

    #[test]
    fn leak_consumes_the_handle() {
        unsafe {
            // Context is deliberately leaked along with the module,
            // mirroring a harness that never tears LLVM down.
            let ctx = trackir_context_new();
            let id = trackir_identity_new(ctx, i32_desc());
            assert!(!id.is_null());
            trackir_identity_leak(id);
        }
    }
}
