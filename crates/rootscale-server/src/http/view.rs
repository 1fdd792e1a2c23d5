// SPDX-License-Identifier: Apache-2.0

use rootscale_model::{
    group_slug, groups_in_order, DimensionRecord, OpenGroups, NEW_GROUP_SENTINEL, SQRT_2,
};
use std::fmt::Write as _;

pub(crate) struct IndexView<'a> {
    pub number: Option<f64>,
    pub result: Option<f64>,
    pub records: &'a [DimensionRecord],
    /// Alphabetical, for the group selectors.
    pub groups: &'a [String],
    pub open: &'a OpenGroups,
}

pub(crate) fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn hidden_open_inputs(open: &OpenGroups) -> String {
    let mut out = String::new();
    for slug in open.iter() {
        let _ = write!(
            out,
            "<input type=\"hidden\" name=\"open_groups\" value=\"{}\">",
            html_escape(slug)
        );
    }
    out
}

fn group_options(groups: &[String], selected: Option<&str>) -> String {
    let mut out = String::new();
    for g in groups {
        let sel = if selected == Some(g.as_str()) {
            " selected"
        } else {
            ""
        };
        let esc = html_escape(g);
        let _ = write!(out, "<option value=\"{esc}\"{sel}>{esc}</option>");
    }
    let _ = write!(
        out,
        "<option value=\"{NEW_GROUP_SENTINEL}\">+ New Group</option>"
    );
    out
}

fn render_compute(view: &IndexView<'_>) -> String {
    let number = view.number.map(|n| n.to_string()).unwrap_or_default();
    let action = html_escape(&view.open.location());
    let mut out = format!(
        "<div class=\"container\"><h1>Multiply by √2</h1>\
<form method=\"POST\" action=\"{action}\">\
<label for=\"number\">Enter a number:</label>\
<input type=\"number\" id=\"number\" name=\"number\" step=\"any\" required value=\"{number}\">\
<button type=\"submit\">Calculate</button></form>"
    );
    if let (Some(number), Some(result)) = (view.number, view.result) {
        let _ = write!(
            out,
            "<div class=\"result\"><p>{number} × √2 = {result:.2}</p><p>√2 ≈ {SQRT_2:.2}</p>\
<div class=\"save-form\"><h3>Save this dimension</h3>\
<form method=\"POST\" action=\"/save\">\
<input type=\"hidden\" name=\"value\" value=\"{result}\">\
<label for=\"dimension_name\">Dimension name:</label>\
<input type=\"text\" id=\"dimension_name\" name=\"dimension_name\" required placeholder=\"e.g., Head Height\">\
<label for=\"group\">Group:</label>\
<select name=\"group\" id=\"group\" class=\"group-selector\" data-new-group=\"new-group-input\">{}</select>\
<div id=\"new-group-input\" style=\"display: none;\">\
<label for=\"new_group\">New Group Name:</label>\
<input type=\"text\" id=\"new_group\" name=\"new_group\" placeholder=\"Enter new group name\"></div>\
{}<button type=\"submit\">Save</button></form></div></div>",
            group_options(view.groups, None),
            hidden_open_inputs(view.open),
        );
    }
    out.push_str("</div>");
    out
}

fn render_record(index: usize, rec: &DimensionRecord, view: &IndexView<'_>) -> String {
    let name = html_escape(&rec.name);
    let hidden = hidden_open_inputs(view.open);
    format!(
        "<div class=\"dimension-item\" id=\"dimension-{index}\" data-index=\"{index}\">\
<div class=\"dimension-drag-handle\">⋮⋮</div>\
<div class=\"dimension-content\"><strong>{name}:</strong> {value:.2} centimeters</div>\
<div class=\"dimension-actions\">\
<a href=\"#\" class=\"action-btn edit-btn\" title=\"Edit this dimension\" data-toggle=\"edit-form-{index}\">✎</a>\
<a href=\"#\" class=\"action-btn\" title=\"Change group\" data-toggle=\"group-form-{index}\">🏷️</a>\
<form method=\"POST\" action=\"/delete/{index}\" class=\"inline-form\">{hidden}\
<button type=\"submit\" class=\"action-btn delete-btn\" title=\"Delete this dimension\">×</button></form>\
</div>\
<div id=\"edit-form-{index}\" class=\"edit-form\">\
<form method=\"POST\" action=\"/rename/{index}\">\
<label for=\"new_name_{index}\">Rename:</label>\
<input type=\"text\" id=\"new_name_{index}\" name=\"new_name\" value=\"{name}\" required>\
<div class=\"edit-form-buttons\"><button type=\"submit\">Save</button>\
<button type=\"button\" data-toggle=\"edit-form-{index}\">Cancel</button></div>{hidden}</form></div>\
<div id=\"group-form-{index}\" class=\"edit-form\">\
<form method=\"POST\" action=\"/update_group/{index}\">\
<label for=\"group_{index}\">Change Group:</label>\
<select name=\"group\" id=\"group_{index}\" class=\"group-selector\" data-new-group=\"new-group-input-{index}\">{options}</select>\
<div id=\"new-group-input-{index}\" style=\"display: none;\">\
<label for=\"new_group_{index}\">New Group Name:</label>\
<input type=\"text\" id=\"new_group_{index}\" name=\"new_group\" placeholder=\"Enter new group name\"></div>\
<div class=\"edit-form-buttons\"><button type=\"submit\">Save</button>\
<button type=\"button\" data-toggle=\"group-form-{index}\">Cancel</button></div>{hidden}</form></div>\
</div>",
        value = rec.value,
        options = group_options(view.groups, Some(rec.group.as_str())),
    )
}

fn render_groups(view: &IndexView<'_>) -> String {
    if view.records.is_empty() {
        return "<p>No dimensions saved yet.</p>".to_string();
    }
    let mut out = String::new();
    for (gi, group) in groups_in_order(view.records).iter().enumerate() {
        let slug = html_escape(&group_slug(group));
        let open = view.open.contains(&group_slug(group));
        let (toggle, collapsed) = if open { ("−", "") } else { ("+", " collapsed") };
        let _ = write!(
            out,
            "<div class=\"group-container\" id=\"group-container-{gi}\" data-index=\"{gi}\">\
<div class=\"group-header\" id=\"group-header-{slug}\">\
<div class=\"group-drag-handle\">⋮⋮</div><span>{}</span>\
<span id=\"group-toggle-{slug}\" class=\"group-toggle group-toggle-btn\" data-slug=\"{slug}\">{toggle}</span></div>\
<div id=\"group-content-{slug}\" class=\"group-content{collapsed}\">",
            html_escape(group),
        );
        for (index, rec) in view.records.iter().enumerate() {
            if &rec.group == group {
                out.push_str(&render_record(index, rec, view));
            }
        }
        out.push_str("</div></div>");
    }
    out
}

/// The whole page: compute form, optional result with its save form, and the
/// grouped, draggable list of saved dimensions.
pub(crate) fn render_index(view: &IndexView<'_>) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Multiply by √2</title>\
<style>{STYLE}</style><script>{SCRIPT}</script></head><body>\
<div class=\"main-container\">{}</div>\
<div class=\"sidebar\"><h2>Saved Dimensions</h2>\
<div id=\"status-message\" class=\"status-message\"></div>\
<div class=\"add-group-form\"><form method=\"POST\" action=\"/add_group\">\
<label for=\"group_name\">Add New Group:</label>\
<input type=\"text\" id=\"group_name\" name=\"group_name\" required placeholder=\"Group name\">\
{}<button type=\"submit\">Add Group</button></form></div>\
<div id=\"dimensions-list\" class=\"dimensions-list\">{}</div></div>\
</body></html>",
        render_compute(view),
        hidden_open_inputs(view.open),
        render_groups(view),
    )
}

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; margin: 0; padding: 20px; display: flex; }
.main-container { flex: 3; max-width: 500px; margin-right: 20px; }
.sidebar { flex: 1; background-color: #f0f0f0; padding: 20px; border-radius: 5px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); min-width: 250px; }
.container { background-color: #f5f5f5; border-radius: 5px; padding: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); margin-bottom: 20px; }
.result { margin-top: 20px; padding: 10px; background-color: #e0f7fa; border-radius: 5px; }
.save-form { margin-top: 20px; padding: 15px; background-color: #f9f9f9; border-radius: 5px; border: 1px solid #ddd; }
input[type="number"], input[type="text"] { padding: 8px; width: 100%; box-sizing: border-box; margin-bottom: 10px; }
button { padding: 8px 15px; background-color: #4caf50; color: white; border: none; border-radius: 4px; cursor: pointer; }
button:hover { background-color: #45a049; }
.dimensions-list { min-height: 50px; }
.dimension-item { padding: 8px; border: 1px solid #ddd; border-radius: 4px; margin-bottom: 8px; background-color: white; display: flex; flex-wrap: wrap; justify-content: space-between; align-items: center; cursor: move; transition: background-color 0.2s, transform 0.1s; }
.dimension-item:hover { background-color: #f9f9f9; }
.dimension-item.dragging, .group-header.dragging { opacity: 0.5; transform: scale(0.98); }
.dimension-item.drag-over { border: 2px dashed #4caf50; padding: 7px; }
.dimension-content { flex-grow: 1; }
.dimension-actions { display: flex; align-items: center; }
.dimension-drag-handle, .group-drag-handle { cursor: move; color: #999; margin-right: 10px; font-size: 16px; }
h2 { margin-top: 0; color: #333; }
.inline-form { display: inline; margin: 0; }
.action-btn { color: #999; background: none; padding: 0; cursor: pointer; font-weight: normal; margin-left: 10px; text-decoration: none; font-size: 16px; }
.action-btn:hover { color: #333; font-weight: bold; background: none; }
.delete-btn:hover { color: #ff0000; }
.edit-btn:hover { color: #2196F3; }
.edit-form { display: none; width: 100%; margin-top: 8px; padding: 8px; background-color: #f9f9f9; border-radius: 4px; }
.edit-form-buttons { display: flex; justify-content: space-between; }
.edit-form-buttons button { flex: 1; margin-right: 4px; }
.edit-form-buttons button:last-child { margin-right: 0; }
.status-message { margin-top: 10px; padding: 8px; border-radius: 4px; display: none; }
.status-success { background-color: #e8f5e9; color: #2e7d32; }
.status-error { background-color: #ffebee; color: #c62828; }
.group-container { margin-bottom: 15px; }
.group-header { background-color: #e0e0e0; padding: 8px 12px; margin-top: 15px; margin-bottom: 8px; border-radius: 4px; font-weight: bold; cursor: move; display: flex; justify-content: space-between; align-items: center; }
.group-header:hover { background-color: #d0d0d0; }
.group-header.drag-over { border: 2px dashed #4caf50; padding: 6px 10px; }
.group-toggle { font-size: 18px; cursor: pointer; margin-left: 10px; }
.group-content { margin-left: 10px; }
.add-group-form { margin-top: 15px; padding: 10px; background-color: #f0f0f0; border-radius: 4px; }
.group-selector { width: 100%; padding: 8px; margin-bottom: 10px; }
.collapsed { display: none; }
"#;

const SCRIPT: &str = r#"
document.addEventListener('DOMContentLoaded', function () {
    let dragged = null;
    let dragKind = null;

    function showStatus(message, kind) {
        const el = document.getElementById('status-message');
        el.textContent = message;
        el.className = 'status-message status-' + kind;
        el.style.display = 'block';
        setTimeout(function () { el.style.display = 'none'; }, 3000);
    }

    function postOrder(url, order, label) {
        fetch(url, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ order: order }),
        })
            .then(function (r) { return r.json(); })
            .then(function (data) {
                if (data.success) {
                    showStatus(label + ' updated successfully!', 'success');
                    setTimeout(function () { window.location.reload(); }, 500);
                } else {
                    showStatus('Failed to update ' + label.toLowerCase() + '.', 'error');
                }
            })
            .catch(function (err) {
                showStatus('An error occurred.', 'error');
                console.error('Error:', err);
            });
    }

    function wireDrag(items, kind, nodeOf, onDrop) {
        items.forEach(function (item) {
            item.setAttribute('draggable', true);
            item.addEventListener('dragstart', function (e) {
                dragged = nodeOf(item);
                dragKind = kind;
                setTimeout(function () { item.classList.add('dragging'); }, 0);
                e.dataTransfer.setData('text/plain', dragged.getAttribute('data-index'));
                e.stopPropagation();
            });
            item.addEventListener('dragend', function () {
                item.classList.remove('dragging');
                items.forEach(function (i) { i.classList.remove('drag-over'); });
            });
            item.addEventListener('dragover', function (e) { e.preventDefault(); });
            item.addEventListener('dragenter', function (e) {
                e.preventDefault();
                if (dragKind === kind && nodeOf(item) !== dragged) {
                    item.classList.add('drag-over');
                }
            });
            item.addEventListener('dragleave', function () { item.classList.remove('drag-over'); });
            item.addEventListener('drop', function (e) {
                e.preventDefault();
                e.stopPropagation();
                item.classList.remove('drag-over');
                if (dragKind === kind && nodeOf(item) !== dragged) {
                    onDrop(dragged, nodeOf(item));
                }
            });
        });
    }

    function moveWithin(list, from, to) {
        const fromPos = list.indexOf(from);
        const toPos = list.indexOf(to);
        list.splice(fromPos, 1);
        list.splice(toPos, 0, from);
        return list;
    }

    const dimensionItems = Array.from(document.querySelectorAll('.dimension-item'));
    wireDrag(dimensionItems, 'dimension', function (n) { return n; }, function (from, to) {
        const order = dimensionItems.map(function (n) { return parseInt(n.getAttribute('data-index'), 10); });
        const moved = moveWithin(order,
            parseInt(from.getAttribute('data-index'), 10),
            parseInt(to.getAttribute('data-index'), 10));
        postOrder('/reorder', moved, 'Order');
    });

    const groupHeaders = Array.from(document.querySelectorAll('.group-header'));
    wireDrag(groupHeaders, 'group', function (n) { return n.parentNode; }, function (from, to) {
        const order = Array.from(document.querySelectorAll('.group-container'))
            .map(function (n) { return parseInt(n.getAttribute('data-index'), 10); });
        const moved = moveWithin(order,
            parseInt(from.getAttribute('data-index'), 10),
            parseInt(to.getAttribute('data-index'), 10));
        postOrder('/reorder_groups', moved, 'Group order');
    });

    document.querySelectorAll('[data-toggle]').forEach(function (el) {
        el.addEventListener('click', function (e) {
            e.preventDefault();
            const form = document.getElementById(el.getAttribute('data-toggle'));
            form.style.display = form.style.display === 'block' ? 'none' : 'block';
        });
    });

    document.querySelectorAll('select[data-new-group]').forEach(function (select) {
        const input = document.getElementById(select.getAttribute('data-new-group'));
        function sync() {
            input.style.display = select.value === '__new__' ? 'block' : 'none';
        }
        select.addEventListener('change', sync);
        sync();
    });

    document.querySelectorAll('.group-toggle-btn').forEach(function (toggle) {
        toggle.addEventListener('click', function (e) {
            e.stopPropagation();
            const slug = toggle.getAttribute('data-slug');
            const content = document.getElementById('group-content-' + slug);
            const url = new URL(window.location.href);
            const params = url.searchParams;
            if (content.classList.contains('collapsed')) {
                content.classList.remove('collapsed');
                toggle.textContent = '−';
                params.append('open', slug);
            } else {
                content.classList.add('collapsed');
                toggle.textContent = '+';
                const remaining = params.getAll('open').filter(function (g) { return g !== slug; });
                params.delete('open');
                remaining.forEach(function (g) { params.append('open', g); });
            }
            window.history.pushState({}, '', url);
        });
    });
});
"#;
