//! Shared test utilities for phase tests.

use quillc::{CodegenOptions, Diagnostic};
use wasmi::core::F64;
use wasmi::{Engine, Instance, Linker, Module, Store};

/// Compile `source`, panicking with the diagnostic on failure.
pub fn compile_ok(source: &str) -> String {
    match quillc::compile(source) {
        Ok(wat) => wat,
        Err(diag) => panic!("compilation failed: {diag}\nsource:\n{source}"),
    }
}

/// Compile `source` without comments, for assertions on instructions.
pub fn compile_bare(source: &str) -> String {
    let options = CodegenOptions {
        emit_comments: false,
        ..CodegenOptions::default()
    };
    match quillc::compile_with(source, options) {
        Ok(wat) => wat,
        Err(diag) => panic!("compilation failed: {diag}\nsource:\n{source}"),
    }
}

/// Compile `source`, expecting a diagnostic.
pub fn compile_err(source: &str) -> Diagnostic {
    match quillc::compile(source) {
        Ok(wat) => panic!("expected an error, got module:\n{wat}"),
        Err(diag) => diag,
    }
}

/// Assemble and instantiate the module compiled from `source`.
pub fn instantiate(source: &str) -> (Store<()>, Instance) {
    let text = compile_ok(source);
    let wasm = wat::parse_str(&text)
        .unwrap_or_else(|err| panic!("emitted WAT does not assemble: {err}\n{text}"));

    let engine = Engine::default();
    let module = Module::new(&engine, &wasm[..]).expect("module should validate");
    let mut store = Store::new(&engine, ());
    let instance = <Linker<()>>::new(&engine)
        .instantiate(&mut store, &module)
        .expect("instantiation should succeed")
        .start(&mut store)
        .expect("start should succeed");
    (store, instance)
}

fn call<P, R>(source: &str, name: &str, params: P) -> R
where
    P: wasmi::WasmParams,
    R: wasmi::WasmResults,
{
    let (mut store, instance) = instantiate(source);
    let func = instance
        .get_typed_func::<P, R>(&store, name)
        .expect("export has the expected signature");
    func.call(&mut store, params).expect("call should not trap")
}

/// Run an `() -> int` export.
pub fn run_int(source: &str, name: &str) -> i32 {
    call::<(), i32>(source, name, ())
}

/// Run an `() -> double` export.
pub fn run_double(source: &str, name: &str) -> f64 {
    call::<(), F64>(source, name, ()).to_float()
}

/// Run an `(int) -> int` export.
pub fn run_int_int(source: &str, name: &str, arg: i32) -> i32 {
    call::<i32, i32>(source, name, arg)
}

/// Run an `(int, int) -> int` export.
pub fn run_int2_int(source: &str, name: &str, a: i32, b: i32) -> i32 {
    call::<(i32, i32), i32>(source, name, (a, b))
}

/// Run a `(double) -> int` export.
pub fn run_double_int(source: &str, name: &str, arg: f64) -> i32 {
    call::<F64, i32>(source, name, F64::from(arg))
}
