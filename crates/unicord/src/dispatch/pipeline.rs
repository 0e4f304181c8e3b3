//! Dispatch pipeline
//!
//! Routes inbound messages and interactions to registered handlers.
//! Message routing order: bot authors dropped, mention handlers (run
//! sequentially outside the middleware chain), catch-all message
//! handlers, then prefix/mention command resolution. Handler errors
//! never escape; they go to the error notification.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use parking_lot::RwLock;
use tracing::{debug, error};
use unicord_core::{Interaction, InteractionType, Message, User};
use unicord_rest::RestClient;

use crate::dispatch::context::{
    ComponentContext, DispatchContext, InteractionContext, MessageContext,
};
use crate::dispatch::middleware::{run_chain, HandlerResult, Middleware, Terminal};
use crate::dispatch::registry::HandlerRegistry;
use crate::dispatch::tokenizer::{is_mention_token, strip_mention_prefix, tokenize};

pub type MessageHandler =
    Arc<dyn Fn(MessageContext) -> BoxFuture<'static, HandlerResult> + Send + Sync>;
pub type InteractionHandler =
    Arc<dyn Fn(InteractionContext) -> BoxFuture<'static, HandlerResult> + Send + Sync>;
pub type ComponentHandler =
    Arc<dyn Fn(ComponentContext) -> BoxFuture<'static, HandlerResult> + Send + Sync>;
pub type UnknownCommandHandler =
    Arc<dyn Fn(MessageContext, String) -> BoxFuture<'static, HandlerResult> + Send + Sync>;
pub type ErrorHandler = Arc<dyn Fn(anyhow::Error) + Send + Sync>;

/// Registries and routing state for one bot instance
pub struct Pipeline {
    rest: Arc<RestClient>,
    prefix: Option<String>,
    mention_as_prefix: bool,
    /// The bot's own user, captured from READY
    identity: RwLock<Option<User>>,
    pub(crate) commands: HandlerRegistry<MessageHandler>,
    pub(crate) slash_commands: HandlerRegistry<InteractionHandler>,
    pub(crate) components: HandlerRegistry<ComponentHandler>,
    pub(crate) mention_handlers: Vec<MessageHandler>,
    pub(crate) message_handlers: Vec<MessageHandler>,
    pub(crate) middleware: Vec<Middleware>,
    pub(crate) on_unknown_command: Option<UnknownCommandHandler>,
    pub(crate) on_error: Option<ErrorHandler>,
}

impl Pipeline {
    #[must_use]
    pub fn new(rest: Arc<RestClient>, prefix: Option<String>, mention_as_prefix: bool) -> Self {
        Self {
            rest,
            prefix,
            mention_as_prefix,
            identity: RwLock::new(None),
            commands: HandlerRegistry::new(),
            slash_commands: HandlerRegistry::new(),
            components: HandlerRegistry::new(),
            mention_handlers: Vec::new(),
            message_handlers: Vec::new(),
            middleware: Vec::new(),
            on_unknown_command: None,
            on_error: None,
        }
    }

    pub fn set_identity(&self, user: User) {
        *self.identity.write() = Some(user);
    }

    #[must_use]
    pub fn identity(&self) -> Option<User> {
        self.identity.read().clone()
    }

    #[must_use]
    pub fn rest(&self) -> &Arc<RestClient> {
        &self.rest
    }

    /// Route one inbound message
    pub async fn handle_message(&self, message: Message) {
        if message.author.bot {
            return;
        }
        let message = Arc::new(message);
        let bot_id = self.identity.read().as_ref().map(|user| user.id.clone());

        // mention handlers run sequentially, outside the middleware chain
        if let Some(id) = &bot_id {
            if message.mentions_user(id) {
                for handler in &self.mention_handlers {
                    let ctx = MessageContext::new(Arc::clone(&self.rest), Arc::clone(&message));
                    if let Err(err) = handler(ctx).await {
                        self.emit_error(err);
                    }
                }
            }
        }

        // catch-alls go through the chain
        for handler in &self.message_handlers {
            let ctx = MessageContext::new(Arc::clone(&self.rest), Arc::clone(&message));
            self.run_message_handler(Arc::clone(handler), ctx).await;
        }

        // command resolution
        let Some(rest_content) = self.strip_command_prefix(&message.content, bot_id.as_deref())
        else {
            return;
        };
        let mut tokens = tokenize(rest_content);
        if tokens.is_empty() {
            return;
        }
        let name = tokens.remove(0);
        let args: Vec<String> = tokens
            .into_iter()
            .filter(|token| !is_mention_token(token))
            .collect();

        let ctx =
            MessageContext::new(Arc::clone(&self.rest), Arc::clone(&message)).with_args(args);
        match self.commands.get(&name) {
            Some(handler) => {
                self.run_message_handler(Arc::clone(handler), ctx).await;
            }
            None => {
                debug!(command = %name, "no handler for command");
                if let Some(notify) = &self.on_unknown_command {
                    if let Err(err) = notify(ctx, name).await {
                        self.emit_error(err);
                    }
                }
            }
        }
    }

    /// Route one inbound interaction
    pub async fn handle_interaction(&self, interaction: Interaction) {
        let interaction = Arc::new(interaction);
        match interaction.kind {
            InteractionType::ApplicationCommand => {
                let Some(name) = interaction
                    .data
                    .as_ref()
                    .and_then(|data| data.name.as_deref())
                else {
                    return;
                };
                let Some(handler) = self.slash_commands.get(name) else {
                    debug!(command = %name, "unmatched application command");
                    return;
                };
                let handler = Arc::clone(handler);
                let ctx = InteractionContext::new(Arc::clone(&self.rest), interaction);
                let terminal: Terminal = Arc::new(move |ctx| {
                    let handler = Arc::clone(&handler);
                    Box::pin(async move {
                        match ctx {
                            DispatchContext::Interaction(ctx) => handler(ctx).await,
                            _ => Ok(()),
                        }
                    })
                });
                self.run_with_chain(terminal, DispatchContext::Interaction(ctx))
                    .await;
            }
            InteractionType::MessageComponent | InteractionType::ModalSubmit => {
                let Some(custom_id) = interaction
                    .data
                    .as_ref()
                    .and_then(|data| data.custom_id.as_deref())
                else {
                    return;
                };
                let Some(handler) = self.components.get(custom_id) else {
                    debug!(custom_id = %custom_id, "unmatched component interaction");
                    return;
                };
                let handler = Arc::clone(handler);
                let ctx = ComponentContext::new(Arc::clone(&self.rest), interaction);
                let terminal: Terminal = Arc::new(move |ctx| {
                    let handler = Arc::clone(&handler);
                    Box::pin(async move {
                        match ctx {
                            DispatchContext::Component(ctx) => handler(ctx).await,
                            _ => Ok(()),
                        }
                    })
                });
                self.run_with_chain(terminal, DispatchContext::Component(ctx))
                    .await;
            }
            InteractionType::Ping | InteractionType::ApplicationCommandAutocomplete => {}
        }
    }

    async fn run_message_handler(&self, handler: MessageHandler, ctx: MessageContext) {
        let terminal: Terminal = Arc::new(move |ctx| {
            let handler = Arc::clone(&handler);
            Box::pin(async move {
                match ctx {
                    DispatchContext::Message(ctx) => handler(ctx).await,
                    _ => Ok(()),
                }
            })
        });
        self.run_with_chain(terminal, DispatchContext::Message(ctx))
            .await;
    }

    async fn run_with_chain(&self, terminal: Terminal, ctx: DispatchContext) {
        let chain: Arc<[Middleware]> = self.middleware.clone().into();
        if let Err(err) = run_chain(chain, terminal, ctx).await {
            self.emit_error(err);
        }
    }

    fn strip_command_prefix<'a>(&self, content: &'a str, bot_id: Option<&str>) -> Option<&'a str> {
        if let Some(prefix) = &self.prefix {
            if let Some(rest) = content.trim_start().strip_prefix(prefix.as_str()) {
                return Some(rest);
            }
        }
        if self.mention_as_prefix {
            if let Some(id) = bot_id {
                if let Some(rest) = strip_mention_prefix(content, id) {
                    return Some(rest);
                }
            }
        }
        None
    }

    pub(crate) fn emit_error(&self, err: anyhow::Error) {
        match &self.on_error {
            Some(notify) => notify(err),
            None => error!(error = %err, "handler failed"),
        }
    }
}
