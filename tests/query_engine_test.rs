//! Tests for the discovery query engine: listings, exact lookup, search,
//! detail, statistics, and their error conditions.

use tooldex::error::RegistryError;
use tooldex::registry::{QueryEngine, Registry, ToolHit};

/// A small three-server registry, parsed from the published artifact shape
fn fixture_registry() -> Registry {
    let json = r##"{
        "generated_at": "2026-08-08T12:00:00Z",
        "servers_dir": "servers",
        "servers": {
            "fetch": {
                "spec_file": "fetch.json",
                "spec_size": 2000,
                "tool_count": 1,
                "tools": {
                    "fetch": {
                        "summary": "Fetch a URL",
                        "description": "Fetch a URL from the internet",
                        "schema_ref": "#/components/schemas/Fetch",
                        "required_params": ["url"],
                        "optional_params": ["max_length"],
                        "params": {
                            "url": {"type": "string", "title": "Url"},
                            "max_length": {"type": "integer"}
                        }
                    }
                }
            },
            "git": {
                "spec_file": "git.json",
                "spec_size": 11000,
                "tool_count": 3,
                "tools": {
                    "git_status": {
                        "summary": "Git Status",
                        "description": "Show the working tree status"
                    },
                    "git_diff": {
                        "summary": "Git Diff",
                        "description": "Show changes between commits"
                    },
                    "git_log": {
                        "summary": "Git Log",
                        "description": "Show commit logs"
                    }
                }
            },
            "web": {
                "spec_file": "web.json",
                "spec_size": 900,
                "tool_count": 1,
                "tools": {
                    "fetch": {
                        "summary": "Fetch a page",
                        "description": "Download a web page"
                    }
                }
            }
        }
    }"##;
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_list_servers_sorted_by_name() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    let servers = engine.list_servers();
    let names: Vec<&str> = servers.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["fetch", "git", "web"]);

    assert_eq!(servers[1].tool_count, 3);
    assert_eq!(servers[1].size_display, "10K");
    assert_eq!(servers[2].size_display, "900B");
}

#[test]
fn test_list_tools_sorted_with_summaries() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    let tools = engine.list_tools("git").unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["git_diff", "git_log", "git_status"]);
    assert_eq!(tools[2].summary, "Git Status");
}

#[test]
fn test_list_tools_unknown_server() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    let err = engine.list_tools("nope").unwrap_err();
    assert!(matches!(err, RegistryError::ServerNotFound { .. }));
}

#[test]
fn test_find_by_name_exact_single_server() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    let hits = engine.find_by_name("git_status");
    assert_eq!(
        hits,
        vec![ToolHit {
            server: "git".to_string(),
            tool: "git_status".to_string(),
            summary: "Git Status".to_string(),
        }]
    );
}

#[test]
fn test_find_by_name_across_servers() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    let hits = engine.find_by_name("fetch");
    let servers: Vec<&str> = hits.iter().map(|h| h.server.as_str()).collect();
    assert_eq!(servers, vec!["fetch", "web"]);
}

#[test]
fn test_find_by_name_no_match_is_empty_not_error() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);
    assert!(engine.find_by_name("git_push").is_empty());
}

#[test]
fn test_find_by_name_agrees_with_list_tools() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    for server in registry.servers.keys() {
        for tool in engine.list_tools(server).unwrap() {
            let hits = engine.find_by_name(&tool.name);
            assert!(
                hits.iter().any(|hit| hit.server == *server),
                "find_by_name('{}') missing server '{}'",
                tool.name,
                server
            );
        }
    }
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    let hits = engine.search("STATUS");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].tool, "git_status");
}

#[test]
fn test_search_matches_descriptions() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    // "commit" appears only in descriptions
    let hits = engine.search("commit");
    let tools: Vec<&str> = hits.iter().map(|h| h.tool.as_str()).collect();
    assert_eq!(tools, vec!["git_diff", "git_log"]);
}

#[test]
fn test_search_one_hit_per_tool_even_with_multiple_field_matches() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    // "git" occurs in both name and summary of every git tool
    let hits = engine.search("git");
    assert_eq!(hits.len(), 3);
}

#[test]
fn test_search_server_then_tool_order() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    let hits = engine.search("fetch");
    let pairs: Vec<(&str, &str)> = hits
        .iter()
        .map(|h| (h.server.as_str(), h.tool.as_str()))
        .collect();
    assert_eq!(pairs, vec![("fetch", "fetch"), ("web", "fetch")]);
}

#[test]
fn test_search_superset_of_find_by_name() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    for server in registry.servers.keys() {
        for tool in engine.list_tools(server).unwrap() {
            let exact = engine.find_by_name(&tool.name);
            let searched = engine.search(&tool.name);
            for hit in &exact {
                assert!(
                    searched.contains(hit),
                    "search('{}') missing exact hit {:?}",
                    tool.name,
                    hit
                );
            }
        }
    }
}

#[test]
fn test_search_no_match_is_empty_not_error() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);
    assert!(engine.search("kubernetes").is_empty());
}

#[test]
fn test_detail_returns_full_record() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    let detail = engine.detail("fetch", "fetch").unwrap();
    assert_eq!(detail.server, "fetch");
    assert_eq!(detail.tool, "fetch");
    assert_eq!(detail.endpoint, "fetch/fetch");
    assert_eq!(detail.summary, "Fetch a URL");
    assert_eq!(detail.description, "Fetch a URL from the internet");
    assert_eq!(detail.required_params, vec!["url"]);
    assert_eq!(detail.optional_params, vec!["max_length"]);
    assert_eq!(detail.params["url"].param_type, "string");
    assert_eq!(detail.params["url"].title.as_deref(), Some("Url"));
    assert!(detail.params["max_length"].title.is_none());
}

#[test]
fn test_detail_unknown_tool() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    let err = engine.detail("git", "nonexistent").unwrap_err();
    assert!(matches!(err, RegistryError::ToolNotFound { .. }));
}

#[test]
fn test_detail_unknown_server_takes_precedence() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    let err = engine.detail("nope", "git_status").unwrap_err();
    assert!(matches!(err, RegistryError::ServerNotFound { .. }));
}

#[test]
fn test_stats_aggregates_counts() {
    let registry = fixture_registry();
    let engine = QueryEngine::new(&registry);

    let stats = engine.stats();
    assert_eq!(stats.generated_at, registry.generated_at);
    assert_eq!(stats.server_count, 3);
    assert_eq!(stats.tool_count, 5);
    assert_eq!(
        stats.per_server,
        vec![
            ("fetch".to_string(), 1),
            ("git".to_string(), 3),
            ("web".to_string(), 1),
        ]
    );
}
