//! The identity-function builder.
//!
//! Builds the smallest useful function for exercising GC-tracked
//! pointers: one that returns its argument unchanged, typed in the
//! tracked address space. Harnesses hand the produced function to the
//! collector passes or a JIT and assert that the value survives the
//! round trip.

use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::types::{BasicType, BasicTypeEnum, PointerType};
use inkwell::values::FunctionValue;

use tracing::debug;

use crate::address_space::GcAddressSpace;
use crate::error::BuildError;

/// Name of the module created to host each built function.
pub const SHADOW_MODULE: &str = "shadow";

/// Name of the built function.
pub const IDENTITY_NAME: &str = "identity";

/// Name of the function's single basic block.
pub const ENTRY_BLOCK: &str = "top";

/// A freshly built identity function together with the module that
/// owns it.
///
/// The module is created as a side effect of every build and is not
/// registered with anything; it lives exactly as long as this value
/// unless [`leak`](IdentityFunction::leak) is called.
#[derive(Debug)]
pub struct IdentityFunction<'ctx> {
    module: Module<'ctx>,
    function: FunctionValue<'ctx>,
}

impl<'ctx> IdentityFunction<'ctx> {
    /// The built function.
    pub fn function(&self) -> FunctionValue<'ctx> {
        self.function
    }

    /// The module hosting the function.
    pub fn module(&self) -> &Module<'ctx> {
        &self.module
    }

    /// Consume the wrapper, returning the owning module.
    pub fn into_module(self) -> Module<'ctx> {
        self.module
    }

    /// Leak the owning module and return the bare function value.
    ///
    /// The module is kept alive for the remainder of the process. This
    /// mirrors the usual lifecycle in throwaway test scaffolding, where
    /// the harness tears the whole process down afterwards; it is a
    /// deliberate leak and must not be used on production code paths.
    pub fn leak(self) -> FunctionValue<'ctx> {
        let IdentityFunction { module, function } = self;
        std::mem::forget(module);
        function
    }
}

/// Build an identity function over the tracked variant of `pointer_ty`.
///
/// Given a pointer type with pointee `T`, creates a fresh module named
/// `shadow` containing one externally linked function `identity` of
/// type `(T addrspace(10)*) -> T addrspace(10)*`. The body is a single
/// basic block `top` holding one `ret` of the first parameter.
///
/// The context must outlive the returned value; nothing is read from
/// process-wide state.
pub fn build_identity<'ctx>(
    context: &'ctx Context,
    pointer_ty: PointerType<'ctx>,
) -> Result<IdentityFunction<'ctx>, BuildError> {
    let element = pointer_ty.get_element_type();
    let pointee = BasicTypeEnum::try_from(element)
        .map_err(|_| BuildError::NonBasicPointee(format!("{element:?}")))?;
    let tracked = pointee.ptr_type(GcAddressSpace::Tracked.into());

    let module = context.create_module(SHADOW_MODULE);
    let fn_ty = tracked.fn_type(&[tracked.into()], false);
    let function = module.add_function(IDENTITY_NAME, fn_ty, Some(Linkage::External));

    let entry = context.append_basic_block(function, ENTRY_BLOCK);
    let builder = context.create_builder();
    builder.position_at_end(entry);

    let param = function
        .get_nth_param(0)
        .ok_or(BuildError::MissingParam(IDENTITY_NAME, 0))?;
    builder.build_return(Some(&param))?;

    debug!(pointee = ?pointee, "built identity function");

    Ok(IdentityFunction { module, function })
}
