mod app;
mod permission;
mod preview_overlay;
mod replay;
mod settings;

use app::App;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title("FaceCam")
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(760.0, 680.0),
            ..Default::default()
        })
        .run()
}
