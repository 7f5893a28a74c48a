// Copyright 2024 Felix Engl
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Breadth-first traversal of the web subtree under a seed url.

use crate::blacklist::Blacklist;
use crate::context::Context;
use crate::crawl::rejection::RejectionLog;
use crate::crawl::{descend_redirect, download_child, CrawlOutcome, RejectReason};
use crate::extraction::ExtractedLink;
use crate::fetching::FetchStatus;
use crate::queue::{UrlQueue, UrlQueueElement};
use crate::robots::RobotsRegistry;
use crate::url::CrawlUrl;
use log::{debug, info, warn};

/// Retrieves the part of the web reachable from `start_url`.
///
/// The traversal is breadth-first: the seed goes into a FIFO queue,
/// every dequeued url is downloaded (or reused from the download
/// records), its body is parsed for links when depth permits, and each
/// child that survives [`download_child`] is enqueued one level
/// deeper. The loop stops when the queue runs dry, the byte quota is
/// exceeded, or the fetcher reports a fatal write error.
pub fn retrieve_tree<C: Context>(ctx: &mut C, start_url: &CrawlUrl) -> CrawlOutcome {
    let mut status = FetchStatus::Success;

    // The original stays around as the reference for the admission
    // rules; the queue consumes a copy.
    let start = start_url.clone();

    let mut queue = UrlQueue::new();
    let mut blacklist = Blacklist::new();
    let mut robots = RobotsRegistry::new();

    queue.enqueue(UrlQueueElement::new(start.clone(), None, 0, true, false));
    blacklist.add(start.as_str());

    let mut rejection_log = RejectionLog::open(ctx.config().rejected_log.as_deref());
    let locale = ctx
        .config()
        .locale
        .clone()
        .unwrap_or_else(|| "None".to_string());

    loop {
        if quota_exceeded(ctx) {
            break;
        }
        if status == FetchStatus::FatalWriteError {
            break;
        }

        let Some(item) = queue.dequeue() else {
            break;
        };
        let UrlQueueElement {
            url,
            referer,
            depth,
            html_allowed,
            css_allowed,
        } = item;

        let mut descend = false;
        let mut is_css = false;
        let mut dash_p_leaf_html = false;
        let mut file = None;

        // A url that was already downloaded is not fetched again, but
        // it may reach this loop a second time at a smaller depth, in
        // which case its children deserve another look.
        if let Some(known) = ctx.downloaded_file_for(url.as_str()) {
            debug!(
                "Already downloaded {:?}, reusing it from {:?}.",
                url.as_str(),
                known
            );
            let css_hit = css_allowed && ctx.is_downloaded_css(&known);
            if css_hit || (html_allowed && ctx.is_downloaded_html(&known)) {
                descend = true;
                is_css = css_hit;
            }
            file = Some(known);
        } else {
            let result = ctx.retrieve(&url, referer.as_deref());
            status = result.status;
            file = result.file;

            if html_allowed
                && file.is_some()
                && status == FetchStatus::Success
                && result.flags.retrieval_ok
                && result.flags.is_html
            {
                descend = true;
                is_css = false;
            }

            // The css hint can override the content type; plenty of
            // servers serve css as text/plain.
            if file.is_some()
                && status == FetchStatus::Success
                && result.flags.retrieval_ok
                && (result.flags.is_css || css_allowed)
            {
                descend = true;
                is_css = true;
            }

            if let Some(redirected) = result.redirected {
                // We were redirected, possibly to another host or
                // path. Check whether the destination is one we would
                // have admitted.
                if descend {
                    let reason = descend_redirect(
                        ctx,
                        &redirected,
                        &url,
                        depth,
                        &start,
                        &mut blacklist,
                        &mut robots,
                    );
                    if reason == RejectReason::Success {
                        // The pre-redirect form must not be enqueued
                        // again either.
                        blacklist.add(url.as_str());
                    } else {
                        rejection_log.log(reason, &url, &start);
                        descend = false;
                    }
                }
            }
        }

        if ctx.config().spider {
            ctx.visited_url(url.as_str(), referer.as_deref());
        }

        if descend && ctx.config().reclevel.exceeded_by(depth) {
            if ctx.config().page_requisites && ctx.config().reclevel.in_requisites_window(depth) {
                // Past the depth bound only the inline requisites of
                // this page may still be loaded.
                dash_p_leaf_html = true;
            } else {
                debug!(
                    "Not descending further; at depth {}, max. {}.",
                    depth,
                    ctx.config().reclevel
                );
                descend = false;
            }
        }

        if descend {
            if let Some(file_path) = file.as_deref() {
                let (mut children, meta_nofollow) = if is_css {
                    (ctx.get_urls_css(file_path, &url), false)
                } else {
                    let extraction = ctx.get_urls_html(file_path, &url);
                    (extraction.links, extraction.meta_nofollow)
                };

                if ctx.config().use_robots && meta_nofollow {
                    info!(
                        "nofollow attribute found in {file_path}. Will not follow any links on this page"
                    );
                    children.clear();
                }

                if !children.is_empty() {
                    let referer_url = if url.has_credentials() {
                        url.with_auth_stripped()
                    } else {
                        url.as_str().to_string()
                    };

                    for child in children {
                        if child.ignore_when_downloading {
                            debug!(
                                "Not following due to 'ignore' flag: {}",
                                child.url.as_str()
                            );
                            continue;
                        }
                        if dash_p_leaf_html && !child.inline {
                            debug!(
                                "Not following due to 'link inline' flag: {}",
                                child.url.as_str()
                            );
                            continue;
                        }

                        let reason = download_child(
                            ctx,
                            &child,
                            &url,
                            depth,
                            &start,
                            &mut blacklist,
                            &mut robots,
                        );
                        if reason == RejectReason::Success {
                            debug!(
                                "Enqueuing {} ({}) at depth {}",
                                child.url.as_str(),
                                locale,
                                depth + 1
                            );
                            // Blacklist what we enqueue so the same
                            // url cannot be enqueued twice.
                            blacklist.add(child.url.as_str());
                            let ExtractedLink {
                                url: child_url,
                                expects_html,
                                expects_css,
                                ..
                            } = child;
                            queue.enqueue(UrlQueueElement::new(
                                child_url,
                                Some(referer_url.clone()),
                                depth + 1,
                                expects_html,
                                expects_css,
                            ));
                        } else {
                            rejection_log.log(reason, &child.url, &url);
                        }
                    }
                }
            }
        }

        // Either delete-after was requested, or the body was only
        // loaded to harvest its links (spider mode, or rejected by the
        // suffix rules); in both cases the local file goes away.
        if let Some(file_path) = file.as_deref() {
            let (delete_after, spider) = {
                let config = ctx.config();
                (config.delete_after, config.spider)
            };
            let file_name = file_path.file_name().unwrap_or_default();
            if delete_after || spider || !ctx.rules().acceptable(file_name) {
                if delete_after || spider {
                    info!("Removing {file_path}.");
                } else {
                    info!("Removing {file_path} since it should be rejected.");
                }
                if let Err(error) = ctx.unlink(file_path) {
                    warn!("unlink: {error}");
                }
                ctx.register_delete_file(file_path);
            }
        }
    }

    drop(rejection_log);

    debug!("Queue count {}, maxcount {}.", queue.len(), queue.maxcount());
    // Whatever is left after a premature exit is dropped unfetched.
    queue.clear();

    if quota_exceeded(ctx) {
        CrawlOutcome::QuotaExceeded
    } else if status == FetchStatus::FatalWriteError {
        CrawlOutcome::FatalWriteError
    } else {
        CrawlOutcome::Ok
    }
}

fn quota_exceeded<C: Context>(ctx: &C) -> bool {
    match ctx.config().quota {
        Some(quota) => ctx.total_downloaded_bytes() > quota.as_u64(),
        None => false,
    }
}
