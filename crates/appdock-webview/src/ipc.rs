//! IPC glue between the Rust core and the UI shell.
//!
//! - **JS -> Rust**: the shell calls `window.appdock.request(op, args)`,
//!   which posts `{"id", "op", "args"}` through `window.ipc.postMessage`.
//! - **Rust -> JS**: replies and push events are delivered with
//!   `evaluate_script`, calling `window.appdock._receive(message)`.

/// Injected into the shell webview before any page script runs.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    var pending = {};
    var listeners = {};
    var nextId = 1;
    window.appdock = {
        request: function(op, args) {
            var id = nextId++;
            return new Promise(function(resolve, reject) {
                pending[id] = { resolve: resolve, reject: reject };
                window.ipc.postMessage(JSON.stringify({ id: id, op: op, args: args || {} }));
            });
        },
        on: function(channel, callback) {
            (listeners[channel] = listeners[channel] || []).push(callback);
            return window.appdock.request('events.subscribe', { channel: channel });
        },
        off: function(channel) {
            delete listeners[channel];
            return window.appdock.request('events.unsubscribe', { channel: channel });
        },
        _receive: function(msg) {
            if (msg.channel) {
                (listeners[msg.channel] || []).forEach(function(cb) { cb(msg.event); });
                return;
            }
            var entry = pending[msg.id];
            if (!entry) return;
            delete pending[msg.id];
            if (msg.ok) entry.resolve(msg.data); else entry.reject(msg.error);
        }
    };
})();
"#;

/// Build the script that hands one JSON message to the shell.
pub fn js_deliver(message: &serde_json::Value) -> String {
    let json = serde_json::to_string(message).unwrap_or_else(|_| "null".to_string());
    format!("window.appdock && window.appdock._receive({json});")
}
