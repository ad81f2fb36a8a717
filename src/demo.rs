use glam::IVec2;
use sprig::util::{decrement_to_min, increment_to_max};
use sprig::{Animation, Assets, Canvas, Frame, Outer, Result, Sprite, State, Substate, Superstate};

/// Pixels the hero moves per press.
const STEP: i32 = 8;
const HERO_SIZE: u32 = 16;
const FIELD_MAX: IVec2 = IVec2::new(320 - HERO_SIZE as i32, 180 - HERO_SIZE as i32);

const PANEL_AT: IVec2 = IVec2::new(208, 16);
const CURSOR_OFFSET: IVec2 = IVec2::new(6, 6);
const ITEM_SPACING: i32 = 12;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum MenuItem {
    Resume,
    Title,
    Quit,
}

const MENU_ITEMS: [MenuItem; 3] = [MenuItem::Resume, MenuItem::Title, MenuItem::Quit];

pub struct Title {
    background: Sprite,
    sparkle: Animation,
}

impl Title {
    pub fn new(assets: &mut dyn Assets) -> Result<Self> {
        Ok(Self {
            background: Sprite::load(assets, "title")?,
            // Frame 0 is the flash-in; the loop skips it.
            sparkle: Animation::load(assets, "sparkle", 16, 16, 6, 1, 4)?.at(IVec2::new(152, 120)),
        })
    }
}

impl State for Title {
    fn on_confirm(&mut self, frame: &mut Frame<'_>) {
        match field(frame.assets()) {
            Ok(field) => frame.replace_state(field),
            Err(e) => {
                log::error!("cannot open the field: {e}");
                frame.quit();
            }
        }
    }

    fn on_cancel(&mut self, frame: &mut Frame<'_>) {
        frame.quit();
    }

    fn on_enter(&mut self) {
        self.sparkle.restart();
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.background.draw(canvas);
        self.sparkle.draw(canvas);
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Mode {
    Exploring,
    Menu,
}

/// Persistent part of the field: everything both modes share.
pub struct FieldScene {
    background: Sprite,
    hero: Animation,
    panel: Sprite,
    cursor: Sprite,
    selection: usize,
    request: Option<Mode>,
}

impl FieldScene {
    fn walk(&mut self, delta: IVec2) {
        let to = (self.hero.position() + delta).clamp(IVec2::ZERO, FIELD_MAX);
        self.hero.set_position(to);
    }

    fn draw_world(&mut self, canvas: &mut dyn Canvas) {
        self.background.draw(canvas);
        self.hero.draw(canvas);
    }
}

impl Outer for FieldScene {
    fn next_substate(&mut self) -> Option<Box<dyn Substate<Self>>> {
        match self.request.take()? {
            Mode::Exploring => Self::change_substate::<Exploring>(),
            Mode::Menu => Self::change_substate::<Menu>(),
        }
    }
}

pub fn field(assets: &mut dyn Assets) -> Result<Superstate<FieldScene>> {
    let scene = FieldScene {
        background: Sprite::load(assets, "field")?,
        hero: Animation::load(assets, "hero", HERO_SIZE, HERO_SIZE, 10, 0, 4)?
            .at(IVec2::new(152, 82)),
        panel: Sprite::load(assets, "menu")?,
        cursor: Sprite::load(assets, "cursor")?,
        selection: 0,
        request: None,
    };
    Ok(Superstate::new(scene, Exploring))
}

#[derive(Default)]
struct Exploring;

impl Substate<FieldScene> for Exploring {
    fn on_confirm(&mut self, scene: &mut FieldScene, _frame: &mut Frame<'_>) {
        scene.request = Some(Mode::Menu);
    }

    fn on_move_up(&mut self, scene: &mut FieldScene, _frame: &mut Frame<'_>) {
        scene.walk(IVec2::new(0, -STEP));
    }

    fn on_move_down(&mut self, scene: &mut FieldScene, _frame: &mut Frame<'_>) {
        scene.walk(IVec2::new(0, STEP));
    }

    fn on_move_left(&mut self, scene: &mut FieldScene, _frame: &mut Frame<'_>) {
        scene.walk(IVec2::new(-STEP, 0));
    }

    fn on_move_right(&mut self, scene: &mut FieldScene, _frame: &mut Frame<'_>) {
        scene.walk(IVec2::new(STEP, 0));
    }

    fn draw(&mut self, scene: &mut FieldScene, canvas: &mut dyn Canvas) {
        scene.draw_world(canvas);
    }
}

#[derive(Default)]
struct Menu;

impl Substate<FieldScene> for Menu {
    fn on_enter(&mut self, scene: &mut FieldScene) {
        scene.selection = 0;
    }

    fn on_confirm(&mut self, scene: &mut FieldScene, frame: &mut Frame<'_>) {
        match MENU_ITEMS[scene.selection] {
            MenuItem::Resume => scene.request = Some(Mode::Exploring),
            MenuItem::Title => match Title::new(frame.assets()) {
                Ok(title) => frame.replace_state(title),
                Err(e) => log::error!("cannot return to the title: {e}"),
            },
            MenuItem::Quit => frame.quit(),
        }
    }

    fn on_cancel(&mut self, scene: &mut FieldScene, _frame: &mut Frame<'_>) {
        scene.request = Some(Mode::Exploring);
    }

    fn on_move_up(&mut self, scene: &mut FieldScene, _frame: &mut Frame<'_>) {
        decrement_to_min(&mut scene.selection, 0);
    }

    fn on_move_down(&mut self, scene: &mut FieldScene, _frame: &mut Frame<'_>) {
        increment_to_max(&mut scene.selection, MENU_ITEMS.len());
    }

    fn draw(&mut self, scene: &mut FieldScene, canvas: &mut dyn Canvas) {
        scene.draw_world(canvas);
        scene.panel.draw_at(canvas, PANEL_AT);
        let row = IVec2::new(0, ITEM_SPACING * scene.selection as i32);
        scene.cursor.draw_at(canvas, PANEL_AT + CURSOR_OFFSET + row);
    }
}
