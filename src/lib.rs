//! # trackir
//!
//! GC-aware LLVM IR construction helpers for compiler test harnesses.
//!
//! The backend this crate targets distinguishes garbage-collected
//! references from ordinary pointers by LLVM address space: a pointer in
//! the *tracked* address space is rooted and may be relocated by the
//! collector. Test harnesses that exercise that machinery need small,
//! predictable functions operating on tracked pointers. This crate
//! builds them.
//!
//! The core operation takes a pointer type and produces a fresh module
//! containing a single externally linked function `identity` with
//! signature `(tracked-pointer-to-T) -> tracked-pointer-to-T`, whose
//! body is one basic block with one `ret` of its argument.
//!
//! ## Quick start
//!
//! ```rust
//! use inkwell::context::Context;
//! use inkwell::AddressSpace;
//! use trackir::{build_identity, GcAddressSpace};
//!
//! let context = Context::create();
//! let ptr = context.i32_type().ptr_type(AddressSpace::default());
//!
//! let ident = build_identity(&context, ptr).unwrap();
//! let function = ident.function();
//!
//! assert_eq!(function.count_params(), 1);
//! let param_ty = function.get_type().get_param_types()[0];
//! assert_eq!(
//!     param_ty.into_pointer_type().get_address_space(),
//!     GcAddressSpace::Tracked.into()
//! );
//! ```
//!
//! ## Context handling
//!
//! The LLVM context is passed explicitly rather than read from a
//! process-wide global. `inkwell::context::Context` is not `Sync`, so
//! sharing one context across threads is a compile error, which matches
//! the thread-safety contract of the underlying library.
//!
//! ## Module ownership
//!
//! Each call allocates a fresh module as a side effect and hands it to
//! the caller inside [`IdentityFunction`]. Dropping the value disposes
//! of the module; [`IdentityFunction::leak`] keeps it alive for the
//! rest of the process, which is the conventional choice in throwaway
//! test scaffolding. See the method documentation before using it
//! anywhere that is not a test harness.
//!
//! ## Module overview
//!
//! - [`address_space`] - GC address-space numbering
//! - [`error`] - builder error type
//! - [`identity`] - the identity-function builder
//! - [`ffi`] - C ABI surface for out-of-process harnesses

pub mod address_space;
pub mod error;
pub mod ffi;
pub mod identity;

pub use address_space::GcAddressSpace;
pub use error::BuildError;
pub use identity::{build_identity, IdentityFunction};
