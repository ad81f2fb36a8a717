use glam::IVec2;
use sdl2::rect::Rect;

use crate::clock::Clock;
use crate::error::Result;
use crate::renderer::{Assets, Canvas, Sheet};

/// A whole sheet drawn as one image.
#[derive(Clone, Copy, Debug)]
pub struct Sprite {
    sheet: Sheet,
}

impl Sprite {
    pub fn new(sheet: Sheet) -> Self {
        Self { sheet }
    }

    pub fn load(assets: &mut dyn Assets, name: &str) -> Result<Self> {
        Ok(Self::new(assets.load_sheet(name)?))
    }

    pub fn sheet(&self) -> Sheet {
        self.sheet
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.draw_at(canvas, IVec2::ZERO);
    }

    pub fn draw_at(&self, canvas: &mut dyn Canvas, position: IVec2) {
        canvas.draw(self.sheet, position, None);
    }
}

/// Cycles through equally sized cells of a sheet.
///
/// Cells are laid out left to right and wrap onto the next row when the
/// sheet's width is used up. The cell width is expected to divide the sheet
/// width evenly; if it doesn't, later rows come out shifted.
///
/// Frames advance every `ticks_per_frame` draws. After the last frame the
/// animation jumps back to `loop_frame`, so frames before it play only once.
pub struct Animation {
    sheet: Sheet,
    width: u32,
    height: u32,
    loop_frame: usize,
    frames: usize,
    frame: usize,
    position: IVec2,
    frame_clock: Clock<Animation>,
}

impl Animation {
    /// Panics if `frames` is 0, `loop_frame >= frames`, a cell dimension is 0,
    /// or `ticks_per_frame` is 0.
    pub fn new(
        sheet: Sheet,
        width: u32,
        height: u32,
        ticks_per_frame: u16,
        loop_frame: usize,
        frames: usize,
    ) -> Self {
        assert!(width > 0 && height > 0, "animation cells must be non-empty");
        assert!(frames > 0, "animation needs at least one frame");
        assert!(
            loop_frame < frames,
            "loop frame {loop_frame} out of range for {frames} frames"
        );
        Self {
            sheet,
            width,
            height,
            loop_frame,
            frames,
            frame: 0,
            position: IVec2::ZERO,
            frame_clock: Clock::new(ticks_per_frame, Animation::advance),
        }
    }

    pub fn load(
        assets: &mut dyn Assets,
        name: &str,
        width: u32,
        height: u32,
        ticks_per_frame: u16,
        loop_frame: usize,
        frames: usize,
    ) -> Result<Self> {
        let sheet = assets.load_sheet(name)?;
        Ok(Self::new(
            sheet,
            width,
            height,
            ticks_per_frame,
            loop_frame,
            frames,
        ))
    }

    /// Default position used by [`draw`](Self::draw).
    pub fn at(mut self, position: IVec2) -> Self {
        self.position = position;
        self
    }

    pub fn set_position(&mut self, position: IVec2) {
        self.position = position;
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Back to frame 0 with a fresh cadence.
    pub fn restart(&mut self) {
        self.frame = 0;
        self.frame_clock.reset();
    }

    pub fn source_rect(&self) -> Rect {
        let columns = (self.sheet.width() / self.width).max(1) as usize;
        let column = (self.frame % columns) as i32;
        let row = (self.frame / columns) as i32;
        Rect::new(
            self.width as i32 * column,
            self.height as i32 * row,
            self.width,
            self.height,
        )
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        let position = self.position;
        self.draw_at(canvas, position);
    }

    /// Draw the current cell at `position`, then count one frame toward the next cell.
    pub fn draw_at(&mut self, canvas: &mut dyn Canvas, position: IVec2) {
        canvas.draw(self.sheet, position, Some(self.source_rect()));
        Clock::tick_within(self, |animation| &mut animation.frame_clock);
    }

    fn advance(&mut self) {
        self.frame += 1;
        if self.frame == self.frames {
            self.frame = self.loop_frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeSheets, RecordingCanvas};

    fn sheet(width: u32) -> Sheet {
        Sheet::new(0, width, 256)
    }

    /// frames=4, loop=1, two ticks per frame: 0,1,2,3 then 1,2,3 forever.
    #[test]
    fn wraps_to_loop_frame_not_zero() {
        let mut animation = Animation::new(sheet(2048), 16, 16, 2, 1, 4);
        let mut canvas = RecordingCanvas::default();

        let mut observed = vec![animation.frame()];
        for _ in 0..14 {
            animation.draw(&mut canvas);
            if *observed.last().unwrap() != animation.frame() {
                observed.push(animation.frame());
            }
        }

        assert_eq!(observed, vec![0, 1, 2, 3, 1, 2, 3, 1]);
        assert_eq!(canvas.calls.len(), 14);
    }

    #[test]
    fn loop_frame_zero_restarts_from_the_top() {
        let mut animation = Animation::new(sheet(2048), 16, 16, 1, 0, 3);
        let mut canvas = RecordingCanvas::default();
        let frames: Vec<usize> = (0..4)
            .map(|_| {
                animation.draw(&mut canvas);
                animation.frame()
            })
            .collect();
        assert_eq!(frames, vec![1, 2, 0, 1]);
    }

    #[test]
    fn source_rect_wraps_onto_rows() {
        // 64px sheet of 16px cells: four columns per row.
        let mut animation = Animation::new(sheet(64), 16, 24, 1, 0, 8);
        let mut canvas = RecordingCanvas::default();
        for _ in 0..8 {
            animation.draw_at(&mut canvas, IVec2::new(5, 7));
        }

        let rects: Vec<Rect> = canvas.calls.iter().filter_map(|(_, _, r)| *r).collect();
        assert_eq!(rects[0], Rect::new(0, 0, 16, 24));
        assert_eq!(rects[3], Rect::new(48, 0, 16, 24));
        assert_eq!(rects[4], Rect::new(0, 24, 16, 24));
        assert_eq!(rects[6], Rect::new(32, 24, 16, 24));
        assert!(canvas.calls.iter().all(|(_, pos, _)| *pos == IVec2::new(5, 7)));
    }

    #[test]
    fn draw_uses_default_position() {
        let mut animation = Animation::new(sheet(2048), 8, 8, 4, 0, 2).at(IVec2::new(10, 20));
        let mut canvas = RecordingCanvas::default();
        animation.draw(&mut canvas);
        assert_eq!(canvas.calls[0].1, IVec2::new(10, 20));
    }

    #[test]
    fn restart_resets_frame_and_cadence() {
        let mut animation = Animation::new(sheet(2048), 8, 8, 2, 0, 4);
        let mut canvas = RecordingCanvas::default();
        for _ in 0..3 {
            animation.draw(&mut canvas);
        }
        assert_eq!(animation.frame(), 1);
        animation.restart();
        animation.draw(&mut canvas);
        assert_eq!(animation.frame(), 0);
        animation.draw(&mut canvas);
        assert_eq!(animation.frame(), 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn loop_frame_must_be_inside_the_animation() {
        let _ = Animation::new(sheet(2048), 8, 8, 2, 4, 4);
    }

    #[test]
    #[should_panic(expected = "at least one frame")]
    fn empty_animation_is_rejected() {
        let _ = Animation::new(sheet(2048), 8, 8, 2, 0, 0);
    }

    #[test]
    #[should_panic(expected = "period must be at least 1")]
    fn zero_ticks_per_frame_is_rejected() {
        let _ = Animation::new(sheet(2048), 8, 8, 0, 0, 4);
    }

    #[test]
    fn cell_wider_than_sheet_stacks_one_per_row() {
        let mut animation = Animation::new(Sheet::new(0, 8, 64), 16, 16, 1, 0, 3);
        let mut canvas = RecordingCanvas::default();
        for _ in 0..3 {
            animation.draw(&mut canvas);
        }

        let rects: Vec<Rect> = canvas.calls.iter().filter_map(|(_, _, r)| *r).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 16, 16),
                Rect::new(0, 16, 16, 16),
                Rect::new(0, 32, 16, 16),
            ]
        );
    }

    #[test]
    fn set_position_moves_later_draws() {
        let mut animation = Animation::new(sheet(2048), 8, 8, 4, 0, 2);
        animation.set_position(IVec2::new(3, 9));
        assert_eq!(animation.position(), IVec2::new(3, 9));

        let mut canvas = RecordingCanvas::default();
        animation.draw(&mut canvas);
        assert_eq!(canvas.calls[0].1, IVec2::new(3, 9));
    }

    #[test]
    fn load_resolves_sheet_through_assets() {
        let mut assets = FakeSheets::default();
        let sprite = Sprite::load(&mut assets, "title").unwrap();
        let animation = Animation::load(&mut assets, "hero", 16, 16, 8, 0, 4).unwrap();

        assert_eq!(assets.loaded, vec!["title", "hero"]);
        assert_eq!(sprite.sheet().index(), 0);
        assert_eq!(animation.source_rect(), Rect::new(0, 0, 16, 16));

        let mut canvas = RecordingCanvas::default();
        sprite.draw(&mut canvas);
        assert_eq!(canvas.calls[0], (sprite.sheet(), IVec2::ZERO, None));
    }
}
