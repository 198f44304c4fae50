#![cfg(feature = "integration-tests")]

mod common;

use common::test_utils::{demo, run, scratch_file};

const BROKEN_FRAGMENT: &str = "#version 330\nout vec4 out_Color;\nvoid main(void) { out_Color = undefined_symbol; }\n";

#[test]
fn renders_frames_then_exits_cleanly() {
    let (output, stdout) = run(demo().env("RT3D_EXIT_AFTER_FRAMES", "3"));

    assert!(output.status.success(), "stdout:\n{stdout}");
    assert!(stdout.contains("Entering frame loop"), "stdout:\n{stdout}");
    assert!(stdout.contains("Frame limit of 3 reached"), "stdout:\n{stdout}");
    assert!(!stdout.contains("not compiled"), "stdout:\n{stdout}");
    assert!(!stdout.contains("not linked"), "stdout:\n{stdout}");
}

#[test]
fn shader_inputs_resolve_to_their_fixed_slots() {
    let (output, stdout) = run(demo().env("RT3D_EXIT_AFTER_FRAMES", "1"));

    assert!(output.status.success(), "stdout:\n{stdout}");
    assert!(stdout.contains("in_Position bound to 0"), "stdout:\n{stdout}");
    assert!(stdout.contains("in_Color bound to 1"), "stdout:\n{stdout}");
    assert!(!stdout.contains("instead of"), "stdout:\n{stdout}");
}

#[test]
fn broken_shader_is_tolerated_by_default() {
    let fragment = scratch_file("lenient.frag", BROKEN_FRAGMENT);
    let (output, stdout) = run(demo()
        .env("RT3D_FRAGMENT_SHADER", &fragment)
        .env("RT3D_EXIT_AFTER_FRAMES", "1"));
    std::fs::remove_file(&fragment).unwrap();

    assert!(output.status.success(), "stdout:\n{stdout}");
    assert!(stdout.contains("Fragment shader not compiled."), "stdout:\n{stdout}");
    assert!(stdout.contains("Shader Info Log:"), "stdout:\n{stdout}");
    assert!(stdout.contains("Entering frame loop"), "stdout:\n{stdout}");
}

#[test]
fn broken_shader_is_fatal_when_strict() {
    let fragment = scratch_file("strict.frag", BROKEN_FRAGMENT);
    let (output, stdout) = run(demo()
        .env("RT3D_FRAGMENT_SHADER", &fragment)
        .env("RT3D_STRICT_SHADERS", "1")
        .env("RT3D_EXIT_AFTER_FRAMES", "1"));
    std::fs::remove_file(&fragment).unwrap();

    assert_eq!(output.status.code(), Some(1), "stdout:\n{stdout}");
    assert!(stdout.contains("shader bootstrap failed"), "stdout:\n{stdout}");
    assert!(!stdout.contains("Entering frame loop"), "stdout:\n{stdout}");
}

#[test]
fn missing_shader_file_is_logged_and_tolerated() {
    let (output, stdout) = run(demo()
        .env("RT3D_VERTEX_SHADER", "/nonexistent/minimal.vert")
        .env("RT3D_EXIT_AFTER_FRAMES", "1"));

    assert!(output.status.success(), "stdout:\n{stdout}");
    assert!(stdout.contains("Unable to open file /nonexistent/minimal.vert"), "stdout:\n{stdout}");
}
