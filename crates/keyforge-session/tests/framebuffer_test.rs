use keyforge_session::framebuffer::Framebuffer;

#[test]
fn test_print_advances_cursor_and_flush_trims_trailing_space() {
    let mut fb = Framebuffer::with_dims(10, 3);
    fb.print("hi");
    let frame = fb.flush_and_trim();
    assert_eq!(frame, "hi");
}

#[test]
fn test_newline_moves_to_next_row() {
    let mut fb = Framebuffer::with_dims(5, 3);
    fb.print("ab\ncd");
    let frame = fb.flush_and_trim();
    assert_eq!(frame, "ab\ncd");
}

#[test]
fn test_write_past_last_column_wraps_to_next_row() {
    let mut fb = Framebuffer::with_dims(3, 3);
    fb.print("abcdef");
    let frame = fb.flush_and_trim();
    assert_eq!(frame, "abc\ndef");
}

#[test]
fn test_write_past_last_row_is_dropped_not_panicking() {
    let mut fb = Framebuffer::with_dims(3, 1);
    fb.print("abcdef");
    let frame = fb.flush_and_trim();
    assert_eq!(frame, "abc");
}

#[test]
fn test_flush_clears_the_grid_for_the_next_frame() {
    let mut fb = Framebuffer::with_dims(5, 2);
    fb.print("hi");
    let _ = fb.flush();
    let second = fb.flush_and_trim();
    assert_eq!(second, "");
}

#[test]
fn test_move_cursor_backward_saturates_at_zero() {
    let mut fb = Framebuffer::with_dims(5, 2);
    fb.move_cursor_backward(10);
    fb.print("x");
    let frame = fb.flush_and_trim();
    assert_eq!(frame, "x");
}
