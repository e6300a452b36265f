mod console;
mod games;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use games::dip::celebrate::{Confetti, SharedConfetti};
use games::dip::rng::Lcg;
use games::dip::DipGame;
use games::Game;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// Milliseconds since page load, from `performance.now()`.
fn now_ms() -> Option<f64> {
    Some(web_sys::window()?.performance()?.now())
}

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;

    console::debug(&format!(
        "click: pixel=({}, {}), cell=({}, {}), targets={}",
        mouse_x,
        mouse_y,
        col,
        row,
        cs.targets.len()
    ));

    Some((col, row))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let confetti = Rc::new(RefCell::new(Confetti::new()));
    let game = Rc::new(RefCell::new(DipGame::new(
        Box::new(Lcg::from_entropy()),
        Box::new(SharedConfetti(confetti.clone())),
    )));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }

            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(action_id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut()
                    .handle_input(&InputEvent::Key(c.to_ascii_lowercase()));
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let now = now_ms();
            let size = f.area();

            // Ticks land before drawing, so a buy always sees the last completed tick
            if let Some(now) = now {
                game.borrow_mut().advance(now);
            }

            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            game.borrow().render(f, size, &click_state);

            if let Some(now) = now {
                confetti.borrow_mut().render(f, size, now);
            }
        }
    });

    Ok(())
}
