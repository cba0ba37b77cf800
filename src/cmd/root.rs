use crate::ui::calendar_view::{App, run_app};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;
use leavecal::data::{
    ConfigFile, EventData, LeaveData, Persistable, app_settings::save_settings_to,
    persistence::get_data_dir,
};

pub fn run() -> Result<()> {
    let config = ConfigFile::load_checked()?;
    let mut leave_data = LeaveData::load()?;
    let event_data = EventData::load()?;
    tracing::debug!(
        requests = leave_data.requests.len(),
        events = event_data.events.len(),
        "data loaded"
    );

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let data_dir = get_data_dir()?;
    let mut app = App::new(
        config.employee,
        &mut leave_data,
        &event_data,
        config.settings,
        today,
        data_dir.clone(),
    );

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    // Extract settings before dropping app (which holds a borrow on leave_data)
    let final_settings = app.settings.clone();
    drop(app);

    leave_data.save()?;
    save_settings_to(&final_settings, &data_dir)?;
    tracing::info!("calendar closed, data saved");

    result
}
