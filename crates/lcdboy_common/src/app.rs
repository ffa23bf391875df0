/// Host-facing surface of an emulated machine.
///
/// A host calls `update` once per presented frame and hands in a screen
/// buffer of `width() * height()` bytes; what each byte means (color index,
/// palette entry) is up to the implementing machine.
pub trait App {
    fn init(&mut self);
    fn update(&mut self, screen: &mut [u8]);
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn scale(&self) -> u32;
    fn title(&self) -> String;
}
