use std::collections::{HashMap, HashSet};

use mongodb::bson::doc;
use futures_util::TryStreamExt;
use crate::BuiltIns::mongo::MongoDB;
use serde::{ Serialize, Deserialize };
use crate::utils::response::Response;
use actix_web::{ web, Error, HttpResponse};
use crate::model::{ Comment::CommentCore, Account::AuthorProjection };
use crate::utils::authors::{resolve_authors, resolve_author_or_fallback};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: CommentCore,
    pub author: AuthorProjection,
    pub replies: Vec<CommentNode>,
}

pub async fn task(
    post_id: web::Path<String>
) -> Result<HttpResponse, Error> {
    let post_id = post_id.into_inner();
    if post_id.len() == 0 {
        return Ok(Response::bad_request("post id required"));
    }

    let db = MongoDB.connect();

    // Oldest first, so sibling order inside the forest is stable.
    let collection = db.collection::<CommentCore>("comment_core");
    let result = collection
        .find(doc!{ "post_id": &post_id, "is_approved": true })
        .sort(doc!{ "created_at": 1 })
        .await;

    let mut cursor = match result {
        Ok(cursor) => cursor,
        Err(error) => {
            log::error!("{:?}", error);
            return Ok(Response::internal_server_error());
        }
    };

    let mut comments = Vec::new();
    loop {
        match cursor.try_next().await {
            Ok(Some(comment)) => comments.push(comment),
            Ok(None) => break,
            Err(error) => {
                log::error!("{:?}", error);
                return Ok(Response::internal_server_error());
            }
        }
    }

    let owners: HashSet<String> = comments
        .iter()
        .map(|comment| comment.owner.clone())
        .collect();

    // Authors are read after the comments; a profile edited in between may
    // show its new value here. Accepted, not worth a transaction.
    let authors = resolve_authors(&db, &owners).await;

    let forest = build_forest(comments, &authors);

    Ok(
        HttpResponse::Ok()
        .content_type("application/json")
        .json(forest)
    )
}

// Two passes, so the input order never matters for shape: first wrap every
// comment and remember its slot, then attach each one to its parent. A node
// whose parent id points nowhere becomes a root instead of an error.
pub fn build_forest(
    comments: Vec<CommentCore>,
    authors: &HashMap<String, AuthorProjection>,
) -> Vec<CommentNode> {
    let mut index = HashMap::with_capacity(comments.len());
    let mut nodes = Vec::with_capacity(comments.len());

    for (position, comment) in comments.into_iter().enumerate() {
        index.insert(comment.uuid.clone(), position);
        let author = resolve_author_or_fallback(&comment.owner, authors);
        nodes.push(Some(CommentNode {
            comment,
            author,
            replies: Vec::new(),
        }));
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut roots = Vec::new();

    for position in 0..nodes.len() {
        let parent = nodes[position]
            .as_ref()
            .and_then(|node| node.comment.parent_id.clone());

        match parent.and_then(|id| index.get(&id).copied()) {
            Some(parent_position) if parent_position != position => {
                children[parent_position].push(position);
            }
            _ => roots.push(position),
        }
    }

    roots
        .into_iter()
        .filter_map(|position| assemble(position, &mut nodes, &children))
        .collect()
}

// Iterative post-order with an explicit work stack: reply depth is unbounded
// by contract, so tree depth must never translate into call-stack depth.
fn assemble(
    root: usize,
    nodes: &mut Vec<Option<CommentNode>>,
    children: &[Vec<usize>],
) -> Option<CommentNode> {
    struct Frame {
        node: CommentNode,
        position: usize,
        next_child: usize,
    }

    let mut stack = vec![Frame {
        node: nodes[root].take()?,
        position: root,
        next_child: 0,
    }];

    while let Some(top) = stack.last_mut() {
        let position = top.position;
        let pending = top.next_child;
        let child_list = &children[position];

        if pending < child_list.len() {
            top.next_child += 1;
            if let Some(node) = nodes[child_list[pending]].take() {
                stack.push(Frame {
                    node,
                    position: child_list[pending],
                    next_child: 0,
                });
            }
            continue;
        }

        // All replies attached; fold into the parent frame, or finish.
        let finished = match stack.pop() {
            Some(frame) => frame.node,
            None => break,
        };

        match stack.last_mut() {
            Some(parent) => parent.node.replies.push(finished),
            None => return Some(finished),
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(uuid: &str, parent_id: Option<&str>, created_at: i64) -> CommentCore {
        CommentCore {
            uuid: uuid.to_string(),
            post_id: "post-1".to_string(),
            owner: "u1".to_string(),
            text: format!("text of {uuid}"),
            parent_id: parent_id.map(|p| p.to_string()),
            is_approved: true,
            like_count: 0,
            created_at,
        }
    }

    // parent uuid -> sorted child uuids, ignoring sibling order
    fn shape(forest: &[CommentNode]) -> HashMap<String, Vec<String>> {
        fn walk(node: &CommentNode, shape: &mut HashMap<String, Vec<String>>) {
            let mut children: Vec<String> = node
                .replies
                .iter()
                .map(|reply| reply.comment.uuid.clone())
                .collect();
            children.sort();
            shape.insert(node.comment.uuid.clone(), children);
            for reply in &node.replies {
                walk(reply, shape);
            }
        }

        let mut out = HashMap::new();
        for root in forest {
            walk(root, &mut out);
        }
        out
    }

    #[test]
    fn reply_nests_under_its_parent() {
        let forest = build_forest(
            vec![comment("a", None, 1), comment("b", Some("a"), 2)],
            &HashMap::new(),
        );

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].comment.uuid, "a");
        assert_eq!(forest[0].replies.len(), 1);
        assert_eq!(forest[0].replies[0].comment.uuid, "b");
        assert!(forest[0].replies[0].replies.is_empty());
    }

    #[test]
    fn orphan_becomes_a_root_not_an_error() {
        let forest = build_forest(
            vec![comment("a", None, 1), comment("b", Some("ghost"), 2)],
            &HashMap::new(),
        );

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].comment.uuid, "a");
        assert_eq!(forest[1].comment.uuid, "b");
    }

    #[test]
    fn shape_is_independent_of_input_order() {
        let sorted = vec![
            comment("a", None, 1),
            comment("b", Some("a"), 2),
            comment("c", Some("a"), 3),
            comment("d", Some("b"), 4),
            comment("e", None, 5),
        ];

        let mut reversed = sorted.clone();
        reversed.reverse();

        let mut shuffled = sorted.clone();
        shuffled.swap(0, 3);
        shuffled.swap(1, 4);

        let expected = shape(&build_forest(sorted, &HashMap::new()));
        assert_eq!(shape(&build_forest(reversed, &HashMap::new())), expected);
        assert_eq!(shape(&build_forest(shuffled, &HashMap::new())), expected);
    }

    #[test]
    fn sibling_order_follows_input_order() {
        let forest = build_forest(
            vec![
                comment("a", None, 1),
                comment("b", Some("a"), 2),
                comment("c", Some("a"), 3),
                comment("d", None, 4),
            ],
            &HashMap::new(),
        );

        let roots: Vec<&str> = forest
            .iter()
            .map(|node| node.comment.uuid.as_str())
            .collect();
        assert_eq!(roots, vec!["a", "d"]);

        let replies: Vec<&str> = forest[0]
            .replies
            .iter()
            .map(|node| node.comment.uuid.as_str())
            .collect();
        assert_eq!(replies, vec!["b", "c"]);
    }

    #[test]
    fn unresolved_author_gets_the_fallback_projection() {
        let forest = build_forest(vec![comment("a", None, 1)], &HashMap::new());

        assert_eq!(forest[0].author.first_name, "Usuário");
        assert_eq!(forest[0].author.last_name, "Desconhecido");
        assert!(forest[0].author.avatar_url.is_none());
    }

    #[test]
    fn very_deep_thread_does_not_exhaust_the_stack() {
        let depth = 100_000;

        let mut comments = vec![comment("c0", None, 0)];
        for i in 1..depth {
            comments.push(comment(
                &format!("c{i}"),
                Some(&format!("c{}", i - 1)),
                i as i64,
            ));
        }

        let forest = build_forest(comments, &HashMap::new());
        assert_eq!(forest.len(), 1);

        let mut seen = 1;
        let mut node = &forest[0];
        while let Some(next) = node.replies.first() {
            assert_eq!(node.replies.len(), 1);
            node = next;
            seen += 1;
        }
        assert_eq!(seen, depth);

        // Dismantle iteratively; dropping the nested structure as-is would
        // recurse through drop glue and defeat the point of the test.
        let mut flat = forest;
        while let Some(mut node) = flat.pop() {
            flat.append(&mut node.replies);
        }
    }

    #[test]
    fn deep_chain_assembles_fully() {
        let comments = vec![
            comment("a", None, 1),
            comment("b", Some("a"), 2),
            comment("c", Some("b"), 3),
            comment("d", Some("c"), 4),
        ];

        let forest = build_forest(comments, &HashMap::new());

        assert_eq!(forest.len(), 1);
        let mut node = &forest[0];
        for expected in ["b", "c", "d"] {
            assert_eq!(node.replies.len(), 1);
            node = &node.replies[0];
            assert_eq!(node.comment.uuid, expected);
        }
        assert!(node.replies.is_empty());
    }
}
