use circuitry::circuit::{DrawIntent, NodeKind, NodeTag, Predicate, Signal, Thruster};
use circuitry::state::{GameState, Status};
use macroquad::prelude::*;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

const PANEL_WIDTH: f32 = 240.0;
const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 26.0;
const NODE_ROW: f32 = 30.0;
const GOAL_RADIUS: f32 = 18.0;
const SHIP_SIZE: f32 = 12.0;
/// How far off screen the ship can drift before the run counts as lost.
const DEAD_MARGIN: f32 = 400.0;

const PANEL_COLOR: Color = Color::new(0.09, 0.09, 0.13, 1.0);
const THRUSTER_COLOR: Color = Color::new(0.95, 0.6, 0.2, 1.0);
const PREDICATE_COLOR: Color = Color::new(0.4, 0.85, 0.5, 1.0);
const GATE_COLOR: Color = Color::new(0.45, 0.65, 0.95, 1.0);

/// Per-frame snapshot of the only input the game reads.
struct Mouse {
    x: f32,
    y: f32,
    clicked: bool,
}

fn poll_mouse() -> Mouse {
    let (x, y) = mouse_position();
    Mouse {
        x,
        y,
        clicked: is_mouse_button_pressed(MouseButton::Left),
    }
}

struct Button {
    x: f32,
    y: f32,
    label: &'static str,
}

impl Button {
    fn contains(&self, mouse: &Mouse) -> bool {
        mouse.x >= self.x
            && mouse.x <= self.x + BUTTON_WIDTH
            && mouse.y >= self.y
            && mouse.y <= self.y + BUTTON_HEIGHT
    }
}

fn buttons() -> [Button; 3] {
    [
        Button {
            x: 20.0,
            y: HEIGHT as f32 - 110.0,
            label: "+ predicate",
        },
        Button {
            x: 20.0,
            y: HEIGHT as f32 - 78.0,
            label: "+ gate",
        },
        Button {
            x: 20.0,
            y: HEIGHT as f32 - 46.0,
            label: "+ thruster",
        },
    ]
}

/// Fresh run with the starter circuit wired in: burn the main thruster while
/// the ship is still short of the goal line. The ship starts nose-up
/// (heading 180) so boost carries it up the screen.
fn new_level() -> GameState {
    let mut state = GameState::new(
        Vec2::new(WIDTH as f32 / 2.0, 520.0),
        Vec2::new(WIDTH as f32 / 2.0, 160.0),
    );
    state.ship.rotation = 180;

    let short_of_goal = state
        .store
        .add_predicate(Signal::PosY, Predicate::Gt, 150);
    let boost = state.store.add_thruster(Thruster::Boost);
    if let Some(node) = state.store.get_mut(boost) {
        if let NodeKind::Thruster(thruster) = &mut node.kind {
            thruster.input = Some(short_of_goal);
        }
    }
    state
}

fn window_conf() -> Conf {
    Conf {
        window_title: "pilot circuit".to_owned(),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        fullscreen: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    let buttons = buttons();
    let mut state = new_level();

    loop {
        let mouse = poll_mouse();
        if mouse.clicked {
            if buttons[0].contains(&mouse) {
                state.create_predicate_node();
            } else if buttons[1].contains(&mouse) {
                state.create_gate_node();
            } else if buttons[2].contains(&mouse) {
                state.create_thruster_node();
            }
        }
        if is_key_pressed(KeyCode::P) {
            match state.status {
                Status::Running => state.set_status(Status::Paused),
                Status::Paused => state.set_status(Status::Running),
                _ => {}
            }
        }
        if is_key_pressed(KeyCode::R) {
            state = new_level();
        }

        state.tick(get_frame_time());
        check_outcome(&mut state);
        draw(&state, &buttons, &mouse);
        next_frame().await;
    }
}

/// The UI layer's win/death check; the core only ever sees the status flip.
fn check_outcome(state: &mut GameState) {
    if state.status != Status::Running {
        return;
    }
    if (state.ship.pos - state.goal).length() < GOAL_RADIUS {
        log::info!("level {} cleared", state.level);
        state.set_status(Status::Won);
    } else if state.ship.pos.x < -DEAD_MARGIN
        || state.ship.pos.x > WIDTH as f32 + DEAD_MARGIN
        || state.ship.pos.y < -DEAD_MARGIN
        || state.ship.pos.y > HEIGHT as f32 + DEAD_MARGIN
    {
        state.set_status(Status::Died);
    }
}

fn tag_color(tag: NodeTag) -> Color {
    match tag {
        NodeTag::Thruster => THRUSTER_COLOR,
        NodeTag::Predicate => PREDICATE_COLOR,
        NodeTag::Gate => GATE_COLOR,
    }
}

fn draw_node(intent: &DrawIntent, row: usize) {
    let text = format!("{}  {}", intent.id.0, intent.text);
    let size = measure_text(&text, None, 16, 1.0);
    let x = 20.0;
    let y = 40.0 + row as f32 * NODE_ROW;
    draw_rectangle_lines(x, y, size.width + 16.0, 24.0, 2.0, tag_color(intent.tag));
    draw_text(&text, x + 8.0, y + 17.0, 16.0, WHITE);
}

fn draw_ship(state: &GameState) {
    let ship = &state.ship;
    let radians = (ship.rotation as f32).to_radians();
    let (sin, cos) = radians.sin_cos();
    // boost pushes along local +y, so the nose points where (0, 1) rotates to
    let nose = Vec2::new(-sin, cos);
    let side = Vec2::new(cos, sin);
    let color = if ship.active.any() { YELLOW } else { GRAY };
    draw_triangle(
        ship.pos + nose * SHIP_SIZE,
        ship.pos - nose * (SHIP_SIZE * 0.5) + side * (SHIP_SIZE * 0.6),
        ship.pos - nose * (SHIP_SIZE * 0.5) - side * (SHIP_SIZE * 0.6),
        color,
    );
}

fn draw(state: &GameState, buttons: &[Button; 3], mouse: &Mouse) {
    clear_background(BLACK);

    // playfield
    draw_circle_lines(state.goal.x, state.goal.y, GOAL_RADIUS, 2.0, GREEN);
    draw_ship(state);

    // node panel: the core hands over (id, tag, pos, text) records and the
    // renderer lays them out by id, one per row
    draw_rectangle(0.0, 0.0, PANEL_WIDTH, HEIGHT as f32, PANEL_COLOR);
    let mut intents = state.store.draw_intents();
    intents.sort_by_key(|intent| intent.id);
    draw_text("circuit", 20.0, 26.0, 20.0, WHITE);
    for (row, intent) in intents.iter().enumerate() {
        draw_node(intent, row);
    }

    for button in buttons.iter() {
        let hovered = button.contains(mouse);
        let color = if hovered { WHITE } else { GRAY };
        draw_rectangle_lines(button.x, button.y, BUTTON_WIDTH, BUTTON_HEIGHT, 2.0, color);
        draw_text(button.label, button.x + 8.0, button.y + 18.0, 16.0, color);
    }

    // HUD
    let status_line = match state.status {
        Status::Running => String::new(),
        Status::Paused => "paused -- [P] to resume".to_owned(),
        Status::Won => "goal reached! [R] for a new run".to_owned(),
        Status::Died => "lost in the void. [R] for a new run".to_owned(),
    };
    if !status_line.is_empty() {
        draw_text(&status_line, PANEL_WIDTH + 20.0, 26.0, 20.0, WHITE);
    }
    draw_text(
        &format!("fps {}", get_fps()),
        WIDTH as f32 - 80.0,
        26.0,
        16.0,
        GRAY,
    );
    draw_text(
        &format!("level {}", state.level),
        WIDTH as f32 - 80.0,
        46.0,
        16.0,
        GRAY,
    );
}
