//! Bot composition root
//!
//! Wires the gateway sessions, the rate-limited REST client and the
//! dispatch pipeline together behind one registration surface. Handlers
//! are registered before [`Bot::start`]; `start` connects the shards and
//! pumps the merged event stream into the pipeline.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};
use unicord_common::{BotConfig, Result};
use unicord_core::{EventType, FileData, MessagePayload};
use unicord_gateway::{Event, ReadyPayload, SessionConfig, ShardCoordinator};
use unicord_rest::RestClient;

use crate::dispatch::context::{
    ComponentContext, DispatchContext, InteractionContext, MessageContext,
};
use crate::dispatch::middleware::{HandlerResult, Next};
use crate::dispatch::pipeline::Pipeline;

type EventHandler = Arc<dyn Fn(Event) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Commands scheduled for a bulk overwrite at startup
struct CommandSync {
    commands: Vec<Value>,
    /// Global when `None`
    guild_id: Option<String>,
    done: AtomicBool,
}

/// The bot runtime
pub struct Bot {
    config: BotConfig,
    pipeline: Pipeline,
    event_handlers: Vec<(EventType, EventHandler)>,
    command_sync: Option<CommandSync>,
}

impl Bot {
    #[must_use]
    pub fn new(config: BotConfig) -> Self {
        let rest = Arc::new(RestClient::new(&config.token, &config.api_base_url));
        let pipeline = Pipeline::new(rest, config.prefix.clone(), true);
        Self {
            config,
            pipeline,
            event_handlers: Vec::new(),
            command_sync: None,
        }
    }

    /// Build from `DISCORD_TOKEN` and friends in the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(BotConfig::from_env()?))
    }

    #[must_use]
    pub fn rest(&self) -> &Arc<RestClient> {
        self.pipeline.rest()
    }

    // === Registration ===

    /// Register a prefix command with optional aliases
    pub fn command<F, Fut>(&mut self, name: &str, aliases: &[&str], handler: F) -> &mut Self
    where
        F: Fn(MessageContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.pipeline.commands.insert_with_aliases(
            name,
            aliases,
            Arc::new(move |ctx| Box::pin(handler(ctx))),
        );
        self
    }

    /// Register an application (slash) command handler by name
    pub fn slash<F, Fut>(&mut self, name: &str, handler: F) -> &mut Self
    where
        F: Fn(InteractionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.pipeline
            .slash_commands
            .insert(name, Arc::new(move |ctx| Box::pin(handler(ctx))));
        self
    }

    /// Register a component handler by custom id
    pub fn component<F, Fut>(&mut self, custom_id: &str, handler: F) -> &mut Self
    where
        F: Fn(ComponentContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.pipeline
            .components
            .insert(custom_id, Arc::new(move |ctx| Box::pin(handler(ctx))));
        self
    }

    /// Register a button handler by custom id
    pub fn button<F, Fut>(&mut self, custom_id: &str, handler: F) -> &mut Self
    where
        F: Fn(ComponentContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.component(custom_id, handler)
    }

    /// Register a select-menu handler by custom id
    pub fn select_menu<F, Fut>(&mut self, custom_id: &str, handler: F) -> &mut Self
    where
        F: Fn(ComponentContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.component(custom_id, handler)
    }

    /// Run on every non-bot message
    pub fn on_message<F, Fut>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(MessageContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.pipeline
            .message_handlers
            .push(Arc::new(move |ctx| Box::pin(handler(ctx))));
        self
    }

    /// Run when a message mentions the bot (outside the middleware chain)
    pub fn on_mention<F, Fut>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(MessageContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.pipeline
            .mention_handlers
            .push(Arc::new(move |ctx| Box::pin(handler(ctx))));
        self
    }

    /// Subscribe to a raw gateway event by type
    pub fn on_event<F, Fut>(&mut self, event_type: EventType, handler: F) -> &mut Self
    where
        F: Fn(Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.event_handlers
            .push((event_type, Arc::new(move |event| Box::pin(handler(event)))));
        self
    }

    /// Add a middleware layer; layers wrap handlers in registration order
    pub fn middleware<F, Fut>(&mut self, layer: F) -> &mut Self
    where
        F: Fn(DispatchContext, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.pipeline
            .middleware
            .push(Arc::new(move |ctx, next| Box::pin(layer(ctx, next))));
        self
    }

    /// Subscribe to unresolved prefix commands
    pub fn on_unknown_command<F, Fut>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(MessageContext, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.pipeline.on_unknown_command =
            Some(Arc::new(move |ctx, name| Box::pin(handler(ctx, name))));
        self
    }

    /// Subscribe to handler errors; without this they go to the log
    pub fn on_error<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(anyhow::Error) + Send + Sync + 'static,
    {
        self.pipeline.on_error = Some(Arc::new(handler));
        self
    }

    /// Bulk-overwrite global application commands once READY arrives
    pub fn sync_commands(&mut self, commands: Vec<Value>) -> &mut Self {
        self.command_sync = Some(CommandSync {
            commands,
            guild_id: None,
            done: AtomicBool::new(false),
        });
        self
    }

    /// Bulk-overwrite application commands for one guild once READY arrives
    pub fn sync_guild_commands(&mut self, guild_id: &str, commands: Vec<Value>) -> &mut Self {
        self.command_sync = Some(CommandSync {
            commands,
            guild_id: Some(guild_id.to_string()),
            done: AtomicBool::new(false),
        });
        self
    }

    // === Runtime ===

    /// Connect the shards and pump events until the bus closes
    pub async fn start(self) -> Result<()> {
        let shard_count = self.config.shard_count.max(1);
        let session_config = SessionConfig {
            token: self.config.token.clone(),
            intents: self.config.intents,
            gateway_url: self.config.gateway_url.clone(),
            shard_count,
        };

        let bot = Arc::new(self);
        let mut coordinator = ShardCoordinator::new(session_config);
        let mut events = coordinator.subscribe();
        coordinator.spawn(shard_count);
        info!(shard_count, "bot starting");

        loop {
            match events.recv().await {
                Ok(shard_event) => {
                    let bot = Arc::clone(&bot);
                    // each event runs its chain in its own task
                    tokio::spawn(async move {
                        bot.dispatch(shard_event.event).await;
                    });
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event bus lagged, dropping events");
                }
                Err(RecvError::Closed) => break,
            }
        }

        coordinator.shutdown();
        Ok(())
    }

    /// Feed one event through the pipeline
    pub async fn dispatch(&self, event: Event) {
        if let Some(kind) = EventType::from_str_opt(event.name()) {
            for (want, handler) in &self.event_handlers {
                if *want == kind {
                    if let Err(err) = handler(event.clone()).await {
                        self.pipeline.emit_error(err);
                    }
                }
            }
        }

        match event {
            Event::Ready(ready) => {
                info!(user = %ready.user.username, "bot identity captured");
                self.pipeline.set_identity(ready.user.clone());
                self.sync_commands_once(application_id(&ready)).await;
            }
            Event::MessageCreate(message) => self.pipeline.handle_message(*message).await,
            Event::InteractionCreate(interaction) => {
                self.pipeline.handle_interaction(*interaction).await;
            }
            _ => {}
        }
    }

    /// Route a message as if it arrived over the gateway
    pub async fn handle_message(&self, message: unicord_core::Message) {
        self.pipeline.handle_message(message).await;
    }

    /// Route an interaction as if it arrived over the gateway
    pub async fn handle_interaction(&self, interaction: unicord_core::Interaction) {
        self.pipeline.handle_interaction(interaction).await;
    }

    /// Send a message with a file attachment (multipart upload)
    pub async fn upload_file(
        &self,
        channel_id: &str,
        file: FileData,
        payload: impl Into<MessagePayload>,
    ) -> Result<Option<Value>> {
        self.rest()
            .post_form(
                &format!("/channels/{channel_id}/messages"),
                &payload.into(),
                vec![file],
            )
            .await
    }

    async fn sync_commands_once(&self, application_id: &str) {
        let Some(sync) = &self.command_sync else { return };
        if sync.done.swap(true, Ordering::SeqCst) {
            return;
        }

        let result = match &sync.guild_id {
            Some(guild_id) => {
                self.rest()
                    .bulk_overwrite_guild_commands(application_id, guild_id, &sync.commands)
                    .await
            }
            None => {
                self.rest()
                    .bulk_overwrite_global_commands(application_id, &sync.commands)
                    .await
            }
        };
        match result {
            Ok(commands) => info!(count = commands.len(), "application commands synchronized"),
            Err(err) => error!(error = %err, "command synchronization failed"),
        }
    }
}

/// Application id for command registration: READY carries a partial
/// application object, falling back to the bot user id when absent
fn application_id(ready: &ReadyPayload) -> &str {
    ready
        .application
        .as_ref()
        .map_or(ready.user.id.as_str(), |app| app.id.as_str())
}
