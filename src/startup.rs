//! Client Startup
//!
//! Component wiring, the page-ready sequence and event routing.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::application::services::{
    AjaxButtons, AppointmentLedger, FormSubmissionPipeline, HeaderController, NavigationDispatcher,
    NavigationOutcome, NotificationSurface, SearchPipeline, ServiceCatalog, ThemeToggle,
};
use crate::config::Settings;
use crate::domain::{AppointmentRecord, Page};
use crate::infrastructure::http::{Fetcher, ReqwestFetcher};
use crate::infrastructure::metrics;
use crate::infrastructure::page::HeadlessPage;
use crate::infrastructure::storage::{self, StateStore};
use crate::presentation::console::{self, Command};
use crate::presentation::events::ClientEvent;
use crate::shared::error::ClientError;

/// What handling an event left running.
#[derive(Debug)]
pub enum Dispatch {
    /// Handled synchronously, scheduled on a debouncer, or dropped for
    /// want of a runtime
    Done,
    /// A navigation is in flight
    Navigation(JoinHandle<NavigationOutcome>),
}

/// Every client component, wired over one page and one state store.
pub struct VetClinic {
    page: Arc<dyn Page>,
    store: Arc<StateStore>,
    services_region: String,
    notifications: NotificationSurface,
    catalog: Arc<ServiceCatalog>,
    ledger: Arc<AppointmentLedger>,
    search: SearchPipeline,
    navigation: Arc<NavigationDispatcher>,
    forms: FormSubmissionPipeline,
    theme: ThemeToggle,
    header: HeaderController,
    ajax: AjaxButtons,
    form: String,
}

impl VetClinic {
    pub fn build(
        settings: &Settings,
        page: Arc<dyn Page>,
        fetcher: Arc<dyn Fetcher>,
        store: Arc<StateStore>,
    ) -> Self {
        let notifications = NotificationSurface::new(Arc::clone(&page), settings);
        let catalog = Arc::new(ServiceCatalog::new(Arc::clone(&store)));
        let ledger = Arc::new(AppointmentLedger::new(
            Arc::clone(&store),
            settings.storage.mirror_ttl(),
        ));

        let search = SearchPipeline::new(
            Arc::clone(&catalog),
            Arc::clone(&store),
            Arc::clone(&page),
            settings,
        );
        let navigation = Arc::new(NavigationDispatcher::new(
            fetcher,
            Arc::clone(&page),
            notifications.clone(),
            settings,
        ));
        let forms = FormSubmissionPipeline::new(
            Arc::clone(&page),
            Arc::clone(&store),
            Arc::clone(&ledger),
            notifications.clone(),
            settings,
        );
        let theme = ThemeToggle::new(
            Arc::clone(&page),
            Arc::clone(&store),
            notifications.clone(),
            settings,
        );
        let header = HeaderController::new(Arc::clone(&page), settings);
        let ajax = AjaxButtons::new(notifications.clone());

        Self {
            page,
            store,
            services_region: settings.regions.services.clone(),
            notifications,
            catalog,
            ledger,
            search,
            navigation,
            forms,
            theme,
            header,
            ajax,
            form: settings.regions.form.clone(),
        }
    }

    /// Page-ready sequence. Each step runs on its own; a failing step is
    /// logged and the rest still run.
    #[instrument(skip(self))]
    pub fn ready(&self) {
        self.notifications.ensure_toast_container();

        let theme = self.theme.init();

        if self.page.has_region(&self.services_region) {
            match self.catalog.render_grid(self.page.as_ref(), &self.services_region) {
                Ok(count) => debug!(count, "Services grid rendered"),
                Err(e) => warn!(error = %e, "Services grid not rendered"),
            }
        }

        match self.forms.init_table() {
            Ok(Some(rows)) => debug!(rows, "Appointments table rendered"),
            Ok(None) => debug!("No appointments table on this page"),
            Err(e) => warn!(error = %e, "Appointments table not rendered"),
        }

        match self.forms.restore_form_data() {
            Ok(restored) => debug!(restored, "Form restore finished"),
            Err(e) => debug!(error = %e, "No form to restore"),
        }

        info!(theme = %theme, appointments = self.ledger.len(), "Client ready");
    }

    /// Route one event to its component.
    ///
    /// Errors are logged here and never propagate, so a broken component
    /// does not take the others down with it.
    #[instrument(skip(self, event), fields(event = event.event_name()))]
    pub fn handle(&self, event: ClientEvent) -> Dispatch {
        let result: Result<(), ClientError> = match event {
            ClientEvent::Ready => {
                self.ready();
                Ok(())
            }
            ClientEvent::ThemeToggled => {
                self.theme.toggle();
                Ok(())
            }
            ClientEvent::SearchInput { query } => {
                self.search.on_input(&query);
                Ok(())
            }
            ClientEvent::LinkActivated { href } => {
                return match self.navigation.spawn(href) {
                    Some(handle) => Dispatch::Navigation(handle),
                    None => Dispatch::Done,
                };
            }
            ClientEvent::FieldChanged { name, value } => self
                .page
                .set_field(&self.form, &name, &value)
                .map(|found| {
                    if !found {
                        debug!(field = %name, "Form has no such field");
                    }
                })
                .map_err(Into::into),
            ClientEvent::FormSubmitted => self.forms.submit().map(|_| ()).map_err(Into::into),
            ClientEvent::AjaxButtonClicked { target } => {
                self.ajax.activate(&target).map_err(Into::into)
            }
            ClientEvent::MobileMenuOpened => self.header.open_mobile_menu().map_err(Into::into),
            ClientEvent::MobileMenuClosed => self.header.close_mobile_menu().map_err(Into::into),
            ClientEvent::DocumentClicked {
                inside_menu,
                on_opener,
            } => {
                self.header.on_document_click(inside_menu, on_opener);
                Ok(())
            }
            ClientEvent::NavbarToggled => self.header.toggle_navbar().map(|_| ()).map_err(Into::into),
            ClientEvent::Scrolled { offset } => {
                self.header.on_scroll(offset).map(|_| ()).map_err(Into::into)
            }
        };

        if let Err(e) = result {
            error!(error = %e, "Event handler failed");
        }
        Dispatch::Done
    }

    pub fn page(&self) -> &Arc<dyn Page> {
        &self.page
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    pub fn ledger(&self) -> &AppointmentLedger {
        &self.ledger
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn search(&self) -> &SearchPipeline {
        &self.search
    }

    pub fn navigation(&self) -> &Arc<NavigationDispatcher> {
        &self.navigation
    }

    pub fn theme(&self) -> &ThemeToggle {
        &self.theme
    }
}

/// Headless driver: a [`VetClinic`] over an in-memory page, fed line
/// commands from stdin.
pub struct Application {
    clinic: VetClinic,
}

impl Application {
    /// Build the application from settings
    pub fn build(settings: Settings) -> Result<Self, ClientError> {
        let page = Arc::new(headless_page(&settings));
        let fetcher = Arc::new(ReqwestFetcher::new(&settings.navigation)?);
        let store = Arc::new(storage::create_state_store(&settings.storage)?);
        info!(
            base_url = %settings.navigation.base_url,
            durable = settings.storage.data_dir.as_deref().unwrap_or("memory"),
            "Client components built"
        );

        Ok(Self {
            clinic: VetClinic::build(&settings, page, fetcher, store),
        })
    }

    pub fn clinic(&self) -> &VetClinic {
        &self.clinic
    }

    /// Run the page-ready sequence, then process commands until stdin
    /// closes, `quit` is read or Ctrl-C arrives.
    pub async fn run_until_stopped(self) -> Result<(), ClientError> {
        self.clinic.ready();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                    break;
                }
            };
            let Some(line) = line else { break };

            match console::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(Command::Metrics)) => println!("{}", metrics::gather_metrics()),
                Ok(Some(Command::Show(region))) => match self.clinic.page().html(&region) {
                    Some(html) => println!("{}", html),
                    None => println!("(no region {})", region),
                },
                Ok(Some(Command::Event(event))) => {
                    if let Dispatch::Navigation(handle) = self.clinic.handle(event) {
                        tokio::spawn(async move {
                            match handle.await {
                                Ok(outcome) => info!(?outcome, "Navigation finished"),
                                Err(e) => error!(error = %e, "Navigation task failed"),
                            }
                        });
                    }
                }
                Err(e) => warn!(error = %e, "Ignoring command"),
            }
        }

        info!("Client stopped");
        Ok(())
    }
}

/// In-memory page carrying every configured region and the booking form.
pub fn headless_page(settings: &Settings) -> HeadlessPage {
    let regions = &settings.regions;
    let page = HeadlessPage::with_regions([
        &regions.content,
        &regions.search_input,
        &regions.search_results,
        &regions.services,
        &regions.appointments_body,
        &regions.form_message,
        &regions.toast_container,
        &regions.header,
        &regions.mobile_menu,
        &regions.navbar_collapse,
        &regions.page_alerts,
    ]
    .map(String::clone));
    page.add_form(&regions.form, &AppointmentRecord::FIELDS);
    page
}
