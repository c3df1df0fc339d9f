/*
 * Per-message handlers used by the subclass procedure. Each handler returns
 * `Some(result)` when it fully answered the message and `None` when the
 * message should continue to the default procedure.
 */

pub(crate) mod background_handler;
pub(crate) mod button_handler;
pub(crate) mod creation_handler;
pub(crate) mod menu_bar_handler;
pub(crate) mod native_color_handler;
pub(crate) mod styling_handler;
