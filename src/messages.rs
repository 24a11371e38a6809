/// WebSocket message types for client-server communication
use crate::pipeline::Dashboard;
use crate::schema::Facet;
use crate::selection::{FacetOptions, FacetValue, FilterSelection};
use serde::{Deserialize, Serialize};

/// Messages sent from client to server
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Request the distinct values of every facet
    Options,

    /// Request the dashboard for the current selection
    Query,

    /// Replace the whole selection
    SetSelection { selection: FilterSelection },

    /// Replace one facet's values
    SetFacet {
        facet: Facet,
        values: Vec<FacetValue>,
    },

    /// Flip one facet value on or off
    Toggle { facet: Facet, value: FacetValue },

    /// Select every value of one facet
    SelectAll { facet: Facet },

    /// Deselect every value of one facet
    Clear { facet: Facet },

    /// Return to the default all-values selection
    Reset,
}

/// Messages sent from server to client
#[derive(Debug, Serialize, Clone)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Facet values offered to the filter controls
    Options {
        options: FacetOptions,
        selection: FilterSelection,
    },

    /// Dashboard products for the current selection
    Dashboard {
        selection: FilterSelection,
        dashboard: Dashboard,
    },

    /// Error occurred
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toggle() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"Toggle","facet":"category","value":24}"#).unwrap();
        match msg {
            ClientMessage::Toggle { facet, value } => {
                assert_eq!(facet, Facet::Category);
                assert_eq!(value, FacetValue::Int(24));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_set_facet_and_unit_variants() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"SetFacet","facet":"country","values":["US","CA"]}"#,
        )
        .unwrap();
        assert!(matches!(msg, ClientMessage::SetFacet { facet: Facet::Country, ref values } if values.len() == 2));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"Reset"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Reset));
    }

    #[test]
    fn test_unknown_facet_rejected() {
        let result = serde_json::from_str::<ClientMessage>(r#"{"type":"Clear","facet":"channel"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_message_json() {
        let json = serde_json::to_string(&ServerMessage::Error {
            message: "bad".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"Error","message":"bad"}"#);
    }
}
